// src/checker/repair.rs
// =============================================================================
// Protocol-switch repair: the one fallback the validator tries when a URL
// does not answer. Plenty of listed websites only work over the other scheme
// (an http:// entry for a site that now only serves https, or the reverse).
// =============================================================================

// Returns the URL with http <-> https swapped, everything after the scheme
// left byte-for-byte as it was
//
// Examples:
//   "http://example.com/a?b=1" -> Some("https://example.com/a?b=1")
//   "HTTPS://example.com"      -> Some("http://example.com")
//   "ftp://example.com"        -> None (no alternate to try)
//   "example.com"              -> None
pub fn switch_protocol(url: &str) -> Option<String> {
    if let Some(rest) = strip_prefix_ignore_case(url, "http://") {
        Some(format!("https://{rest}"))
    } else {
        strip_prefix_ignore_case(url, "https://").map(|rest| format!("http://{rest}"))
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_to_https() {
        assert_eq!(
            switch_protocol("http://example.com/a?b=1#frag"),
            Some("https://example.com/a?b=1#frag".to_string())
        );
    }

    #[test]
    fn test_https_to_http() {
        assert_eq!(
            switch_protocol("https://example.com"),
            Some("http://example.com".to_string())
        );
    }

    #[test]
    fn test_scheme_case_ignored() {
        assert_eq!(
            switch_protocol("HTTP://Example.com/Path"),
            Some("https://Example.com/Path".to_string())
        );
    }

    #[test]
    fn test_no_alternate() {
        assert_eq!(switch_protocol("ftp://example.com"), None);
        assert_eq!(switch_protocol("example.com"), None);
        assert_eq!(switch_protocol(""), None);
        assert_eq!(switch_protocol("httpx://example.com"), None);
    }

    #[test]
    fn test_switch_is_reversible() {
        let original = "http://example.com/x";
        let switched = switch_protocol(original).unwrap();
        assert_eq!(switch_protocol(&switched).as_deref(), Some(original));
    }
}
