use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::matcher::{HostMatcher, MatcherOptions};
use crate::parser::{parse_hosts, parse_hosts_from_file};
use crate::types::{HostEntry, HostValue};

/// Compile parsed entries into a matcher.
///
/// Entries are inserted in order, so for overlapping suffix or glob
/// patterns the one listed first wins.
pub fn compile(entries: &[HostEntry], options: MatcherOptions) -> HostMatcher<HostValue> {
    let mut matcher = HostMatcher::with_options(options);

    for entry in entries {
        let value = match &entry.value {
            Some(text) => HostValue::Text(text.clone()),
            None => HostValue::Present,
        };
        matcher.add_host_with_value(&entry.pattern, value);
    }

    debug!(
        entries = entries.len(),
        patterns = matcher.len(),
        "compiled host rules"
    );
    matcher
}

impl HostMatcher<HostValue> {
    /// Parse and compile host rules from text (see [`parse_hosts`]).
    pub fn from_rules(text: &str, options: MatcherOptions) -> Result<Self> {
        let entries = parse_hosts(text)?;
        Ok(compile(&entries, options))
    }

    /// Parse and compile host rules from a file.
    pub fn from_file(path: impl AsRef<Path>, options: MatcherOptions) -> Result<Self> {
        let entries = parse_hosts_from_file(path)?;
        Ok(compile(&entries, options))
    }
}
