// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Dispatch to the appropriate subcommand handler
// 4. Write result tables and print a summary
// 5. Exit with proper code (0 = results, 1 = nothing usable found, 2 = error)
// =============================================================================

mod checker; // src/checker/ - URL validation and protocol repair
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - defaults and settings
mod crawl; // src/crawl/ - layer-by-layer crawling
mod logging; // src/logging.rs - tracing subscriber
mod table; // src/table.rs - CSV / JSON input and output

use anyhow::{bail, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use cli::{Cli, CrawlArgs, Commands, ValidationArgs};
use crawl::CrawlOutput;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain: "Failed to open ...: No such file"
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = the command produced results
//   Ok(1) = it ran, but no URL validated / no page could be fetched
//   Err   = bad input or configuration (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Commands::Validate { input, output, validation } => {
            let valid = handle_validate(&input, &output, &validation, Console::Stdout).await?;
            Ok(exit_code(!valid.is_empty()))
        }
        Commands::Crawl { urls, seeds, crawl } => {
            let mut seed_urls = urls;
            if let Some(path) = seeds {
                seed_urls.extend(table::read_column(&path, table::URL_COLUMN)?);
            }
            let output = handle_crawl(&seed_urls, &crawl).await?;
            Ok(exit_code(!output.pages.is_empty()))
        }
        Commands::Run { input, validated, validation, crawl } => {
            // With --json, stdout carries only the crawl document
            let console = Console::new(crawl.json);
            let valid = handle_validate(&input, &validated, &validation, console).await?;
            if valid.is_empty() {
                console.say("⚠️  No reachable websites, nothing to crawl");
                return Ok(1);
            }
            let output = handle_crawl(&valid, &crawl).await?;
            Ok(exit_code(!output.pages.is_empty()))
        }
    }
}

fn exit_code(found_something: bool) -> i32 {
    if found_something {
        0
    } else {
        1
    }
}

// Where human-readable progress lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Console {
    Stdout,
    Stderr,
}

impl Console {
    fn new(json: bool) -> Self {
        if json {
            Console::Stderr
        } else {
            Console::Stdout
        }
    }

    fn say(self, message: impl std::fmt::Display) {
        match self {
            Console::Stdout => println!("{message}"),
            Console::Stderr => eprintln!("{message}"),
        }
    }
}

// Handles validation of a `Website` table
async fn handle_validate(
    input: &Path,
    output: &Path,
    args: &ValidationArgs,
    console: Console,
) -> Result<Vec<String>> {
    let config = args.to_config();
    let candidates = table::read_column(input, table::WEBSITE_COLUMN)?;

    let to_check = config.url_limit(candidates.len());
    console.say(format_args!("🔍 Validating {} website(s) from {}", to_check, input.display()));

    let valid = checker::validate_urls(&candidates, &config).await?;
    table::write_urls(output, &valid)?;

    console.say("📊 Validation summary:");
    console.say(format_args!("   ✅ Reachable: {}", valid.len()));
    console.say(format_args!("   ❌ Dropped: {}", to_check - valid.len()));
    console.say(format_args!("   💾 Saved to {}", output.display()));

    Ok(valid)
}

// Handles crawling from a list of seed URLs
async fn handle_crawl(seeds: &[String], args: &CrawlArgs) -> Result<CrawlOutput> {
    if seeds.is_empty() {
        bail!("No seed URLs given: pass URLs as arguments or a table with --seeds");
    }

    let config = args.to_config();
    if !args.json {
        println!("🔍 Crawling from {} seed URL(s)", seeds.len().min(config.max_pages));
        println!("📊 Max crawl depth: {}", config.max_depth);
    }

    let output = crawl::crawl_urls(seeds, &config).await?;

    table::write_pages(&args.output, &output.pages)?;
    if let Some(graph) = &args.graph {
        table::write_graph(graph, &output.adjacency)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(&output, &args.output, args.graph.as_ref());
    }

    Ok(output)
}

// Prints crawled pages as a human-readable table in the terminal
fn print_table(output: &CrawlOutput, saved_to: &Path, graph: Option<&PathBuf>) {
    println!("{:<60} {:>10} {:>8}", "URL", "CHARS", "LINKS");
    println!("{}", "=".repeat(80));

    for page in &output.pages {
        // Truncate URL if too long for display
        let url_display = if page.url.chars().count() > 57 {
            format!("{}...", page.url.chars().take(57).collect::<String>())
        } else {
            page.url.clone()
        };
        let links = output.adjacency.get(&page.url).map_or(0, Vec::len);

        println!("{:<60} {:>10} {:>8}", url_display, page.content.chars().count(), links);
    }

    println!();

    let edges: usize = output.adjacency.values().map(Vec::len).sum();
    println!("📊 Summary:");
    println!("   📄 Pages crawled: {}", output.pages.len());
    println!("   🔗 Links discovered: {}", edges);
    println!("   💾 Saved to {}", saved_to.display());
    if let Some(graph) = graph {
        println!("   🕸️  Link graph saved to {}", graph.display());
    }
}
