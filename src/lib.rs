//! Hostname matcher for proxy bypass and allow lists.
//!
//! A [`HostMatcher`] is built once from host patterns, each mapped to a
//! value, and answers "which rule does this hostname hit?" many times.
//! Patterns come in four kinds:
//!
//! | Kind | Example | Matches |
//! |------|---------|---------|
//! | Universal | `*` | Every hostname, ahead of all other rules |
//! | Exact | `example.com` | Only `example.com` |
//! | Suffix | `*.example.com` | Any hostname ending with `.example.com` |
//! | Glob | `192.168.*.1` | Shell-style glob over the whole hostname |
//!
//! Suffix patterns are plain string suffixes: `*example.com` also matches
//! `notexample.com`. Lookup order is universal, exact, suffix, glob; within
//! the suffix and glob kinds the first inserted pattern wins.
//!
//! # Example
//!
//! ```rust
//! use hostmatcher::HostMatcher;
//!
//! let no_proxy = HostMatcher::from_hosts(["localhost", "*.internal", "10.*.*.*"]);
//! assert!(no_proxy.matches("db.internal"));
//! assert!(no_proxy.matches("10.1.2.3"));
//! assert!(!no_proxy.matches("example.com"));
//!
//! let routes = HostMatcher::from_strings([("*.corp.net", "corp-proxy"), ("intranet", "direct")]);
//! assert_eq!(routes.lookup("git.corp.net").map(String::as_str), Some("corp-proxy"));
//! assert_eq!(routes.lookup("example.com"), None);
//! ```
//!
//! # Rule Text
//!
//! Rules can also be loaded from text or a file, one per line:
//!
//! ```text
//! # comment
//! localhost
//! *.corp.net = corp-proxy
//! file: /etc/hosts.d/extra.txt
//! ```
//!
//! ```rust
//! use hostmatcher::{HostMatcher, HostValue, MatcherOptions};
//!
//! let matcher = HostMatcher::from_rules(
//!     "localhost\n*.corp.net = corp-proxy\n",
//!     MatcherOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(matcher.lookup("localhost"), Some(&HostValue::Present));
//! assert_eq!(
//!     matcher.lookup("git.corp.net").and_then(HostValue::as_text),
//!     Some("corp-proxy")
//! );
//! ```

pub mod cache;
pub mod compile;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod types;

// Re-export commonly used items
pub use cache::{CachedHostMatcher, DEFAULT_CACHE_SIZE};
pub use compile::compile;
pub use error::{HostMatcherError, Result};
pub use matcher::{GlobPattern, HostMatcher, MatcherOptions};
pub use parser::{parse_host_list, parse_hosts, parse_hosts_from_file, MAX_INCLUDE_DEPTH};
pub use types::{HostEntry, HostValue, PatternKind, Presence};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workflow() {
        let rules_text = r#"
# Never proxy local traffic
localhost
127.0.0.1
*.local

# Corporate hosts go through the corporate proxy
*.corp.example.com = corp
10.*.*.* = corp
"#;

        let matcher = HostMatcher::from_rules(rules_text, MatcherOptions::default()).unwrap();
        assert_eq!(matcher.len(), 5);

        let cached = CachedHostMatcher::from(matcher);

        assert_eq!(cached.lookup("localhost"), Some(HostValue::Present));
        assert_eq!(cached.lookup("printer.local"), Some(HostValue::Present));
        assert_eq!(
            cached.lookup("git.corp.example.com"),
            Some(HostValue::Text("corp".to_string()))
        );
        assert_eq!(
            cached.lookup("10.20.30.40"),
            Some(HostValue::Text("corp".to_string()))
        );
        assert_eq!(cached.lookup("example.com"), None);
    }

    #[test]
    fn test_no_proxy_list() {
        let patterns = parse_host_list("localhost,*.internal, 192.168.*.*");
        let mut matcher = HostMatcher::from_hosts(&patterns);
        assert!(matcher.matches("api.internal"));
        assert!(matcher.matches("192.168.0.10"));
        assert!(!matcher.matches("example.com"));

        matcher.add_host("*");
        assert!(matcher.matches("example.com"));
    }
}
