// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands:
// - validate: check which websites in a table answer, repairing http/https
// - crawl:    breadth-first crawl from seed URLs
// - run:      validate, then crawl the survivors (the full pipeline)
//
// Defaults for every numeric flag come from src/config.rs.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{self, CrawlConfig, ValidateConfig};

#[derive(Parser, Debug)]
#[command(
    name = "layer-crawler",
    version,
    about = "Validate seed URLs and crawl them layer by layer",
    long_about = "layer-crawler checks which websites in a table are reachable (trying http/https \
                  as a fallback), then crawls them breadth-first, collecting page text and a \
                  graph of discovered links."
)]
pub struct Cli {
    /// Log debug details (fetch failures, probe results) to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep the reachable websites from a table's `Website` column
    ///
    /// Example: layer-crawler validate companies.csv --output valid.csv
    Validate {
        /// CSV file with a `Website` column
        input: PathBuf,

        /// Where to write the `URL` table of reachable websites
        #[arg(long, default_value = "validated_urls.csv")]
        output: PathBuf,

        #[command(flatten)]
        validation: ValidationArgs,
    },

    /// Crawl from seed URLs, one link layer at a time
    ///
    /// Example: layer-crawler crawl https://example.com --max-depth 2
    Crawl {
        /// Seed URLs (combined with --seeds, positional ones first)
        urls: Vec<String>,

        /// CSV file with a `URL` column of seeds (e.g. the output of `validate`)
        #[arg(long)]
        seeds: Option<PathBuf>,

        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Validate a `Website` table, then crawl the reachable sites
    ///
    /// Example: layer-crawler run companies.csv --max-pages 10
    Run {
        /// CSV file with a `Website` column
        input: PathBuf,

        /// Where to write the `URL` table of reachable websites
        #[arg(long, default_value = "validated_urls.csv")]
        validated: PathBuf,

        #[command(flatten)]
        validation: ValidationArgs,

        #[command(flatten)]
        crawl: CrawlArgs,
    },
}

#[derive(Args, Debug)]
pub struct ValidationArgs {
    /// Only check the first N websites
    #[arg(long)]
    pub max_urls: Option<usize>,

    /// Maximum simultaneous reachability probes
    #[arg(long, default_value_t = config::DEFAULT_VALIDATE_CONCURRENCY)]
    pub probe_concurrency: usize,

    /// Seconds before a probe counts as unreachable
    #[arg(long, default_value_t = config::DEFAULT_PROBE_TIMEOUT.as_secs())]
    pub probe_timeout: u64,

    /// User-Agent header sent with probes
    #[arg(long, default_value = config::APP_USER_AGENT)]
    pub probe_user_agent: String,
}

impl ValidationArgs {
    pub fn to_config(&self) -> ValidateConfig {
        ValidateConfig {
            max_concurrency: self.probe_concurrency,
            max_urls: self.max_urls,
            probe_timeout: Duration::from_secs(self.probe_timeout),
            user_agent: self.probe_user_agent.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Where to write the `URL,Content` table of crawled pages
    #[arg(long, default_value = "crawled_data.csv")]
    pub output: PathBuf,

    /// Also write the link graph (parent -> children) as JSON here
    #[arg(long)]
    pub graph: Option<PathBuf>,

    /// Link hops to follow past the seeds (0 = seeds only)
    #[arg(long, default_value_t = 1)]
    pub max_depth: usize,

    /// How many seed URLs to start from (later layers are not capped)
    #[arg(long, default_value_t = 1)]
    pub max_pages: usize,

    /// Maximum simultaneous page fetches
    #[arg(long, default_value_t = config::DEFAULT_CRAWL_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Seconds before a page fetch is abandoned
    #[arg(long, default_value_t = config::DEFAULT_FETCH_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// User-Agent header sent with page fetches
    #[arg(long, default_value = config::APP_USER_AGENT)]
    pub user_agent: String,

    /// Print page records and the link graph as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl CrawlArgs {
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.max_depth,
            max_pages: self.max_pages,
            max_concurrency: self.max_concurrency,
            fetch_timeout: Duration::from_secs(self.timeout),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::parse_from(["layer-crawler", "crawl", "https://example.com"]);
        let Commands::Crawl { urls, seeds, crawl } = cli.command else {
            panic!("expected crawl subcommand");
        };
        assert_eq!(urls, vec!["https://example.com"]);
        assert!(seeds.is_none());

        let config = crawl.to_config();
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_pages, 1);
        assert_eq!(config.max_concurrency, 20);
        assert_eq!(config.fetch_timeout, Duration::from_secs(8));
        assert_eq!(crawl.output, PathBuf::from("crawled_data.csv"));
    }

    #[test]
    fn test_validate_flags() {
        let cli = Cli::parse_from([
            "layer-crawler",
            "validate",
            "in.csv",
            "--max-urls",
            "10",
            "--probe-concurrency",
            "5",
            "-v",
        ]);
        assert!(cli.verbose);
        let Commands::Validate { input, validation, .. } = cli.command else {
            panic!("expected validate subcommand");
        };
        assert_eq!(input, PathBuf::from("in.csv"));

        let config = validation.to_config();
        assert_eq!(config.max_urls, Some(10));
        assert_eq!(config.max_concurrency, 5);
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_run_combines_both_flag_sets() {
        let cli = Cli::parse_from([
            "layer-crawler",
            "run",
            "in.csv",
            "--max-depth",
            "0",
            "--max-pages",
            "3",
            "--graph",
            "graph.json",
        ]);
        let Commands::Run { crawl, validation, .. } = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(crawl.max_depth, 0);
        assert_eq!(crawl.max_pages, 3);
        assert_eq!(crawl.graph, Some(PathBuf::from("graph.json")));
        assert_eq!(validation.probe_concurrency, 50);
    }
}
