/// Marker value for patterns registered without an explicit value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Presence;

/// Value attached to a pattern loaded from rule text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostValue {
    /// The rule had no `= value` part
    Present,
    /// The rule's value
    Text(String),
}

impl HostValue {
    /// The text value, if the rule carried one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            HostValue::Present => None,
            HostValue::Text(s) => Some(s),
        }
    }
}

impl From<Presence> for HostValue {
    fn from(_: Presence) -> Self {
        HostValue::Present
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::Text(s)
    }
}

/// How a pattern is matched.
///
/// Classification is a pure function of the pattern string, checked in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// The literal `*`: matches every hostname
    Universal,
    /// No `*` at all: matches only the identical hostname
    Exact,
    /// `*` followed by a `*`-free remainder: matches hostnames ending with the remainder
    Suffix,
    /// Anything else containing `*`: shell-style glob over the whole hostname
    Glob,
}

impl PatternKind {
    /// Classify a pattern string
    pub fn classify(pattern: &str) -> Self {
        if pattern == "*" {
            PatternKind::Universal
        } else if !pattern.contains('*') {
            PatternKind::Exact
        } else if pattern
            .strip_prefix('*')
            .is_some_and(|rest| !rest.contains('*'))
        {
            PatternKind::Suffix
        } else {
            PatternKind::Glob
        }
    }
}

/// Parsed host rule before compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    /// Host pattern
    pub pattern: String,
    /// Value from `pattern = value`, if given
    pub value: Option<String>,
    /// Line number in the original text (for error reporting)
    pub line_num: usize,
}
