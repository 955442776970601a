mod host;
mod wildcard;

pub use host::HostMatcher;
pub use wildcard::GlobPattern;

/// Matcher options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatcherOptions {
    /// Lowercase patterns on insertion and hostnames on lookup
    pub ignore_case: bool,
}

impl MatcherOptions {
    /// Create new matcher options (case-sensitive).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set case-insensitive matching.
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}
