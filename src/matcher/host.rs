use std::borrow::Cow;
use std::collections::HashMap;

use super::wildcard::GlobPattern;
use super::MatcherOptions;
use crate::types::{PatternKind, Presence};

#[derive(Debug, Clone)]
struct SuffixRule<V> {
    /// Pattern with the leading `*` removed
    suffix: String,
    value: V,
}

#[derive(Debug, Clone)]
struct GlobRule<V> {
    pattern: GlobPattern,
    value: V,
}

/// Hostname matcher.
///
/// Patterns are classified once on insertion (see [`PatternKind`]) and
/// looked up in fixed precedence order:
///
/// 1. `*` matches every hostname, ahead of everything else
/// 2. exact patterns
/// 3. suffix patterns (`*example.com`), first inserted wins
/// 4. glob patterns (`192.168.*.1`), first inserted wins
///
/// Suffix matching is a plain string suffix test: `*example.com` also
/// matches `notexample.com`. Use `*.example.com` to require a dot.
///
/// Inserting takes `&mut self` and lookups take `&self`, so a matcher is
/// built first and then shared read-only.
#[derive(Debug, Clone)]
pub struct HostMatcher<V> {
    options: MatcherOptions,
    universal: Option<V>,
    exact: HashMap<String, V>,
    /// Suffix rules in insertion order; `suffix_index` maps suffix -> position
    suffixes: Vec<SuffixRule<V>>,
    suffix_index: HashMap<String, usize>,
    /// Glob rules in insertion order; `glob_index` maps pattern -> position
    globs: Vec<GlobRule<V>>,
    glob_index: HashMap<String, usize>,
}

impl<V> Default for HostMatcher<V> {
    fn default() -> Self {
        Self::with_options(MatcherOptions::default())
    }
}

impl<V> HostMatcher<V> {
    /// Create an empty case-sensitive matcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty matcher with options
    pub fn with_options(options: MatcherOptions) -> Self {
        Self {
            options,
            universal: None,
            exact: HashMap::new(),
            suffixes: Vec::new(),
            suffix_index: HashMap::new(),
            globs: Vec::new(),
            glob_index: HashMap::new(),
        }
    }

    /// Create a matcher from pattern/value pairs.
    ///
    /// Pairs are inserted in iteration order, which is also the precedence
    /// order among suffix and among glob patterns.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
    {
        Self::from_values_with_options(values, MatcherOptions::default())
    }

    /// Create a matcher from pattern/value pairs with options
    pub fn from_values_with_options<I, S>(values: I, options: MatcherOptions) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
    {
        let mut matcher = Self::with_options(options);
        for (host, value) in values {
            matcher.insert(host.as_ref(), value);
        }
        matcher
    }

    /// Add a pattern with a value. A pattern added twice keeps the later value.
    pub fn add_host_with_value(&mut self, host: &str, value: V) {
        self.insert(host, value);
    }

    fn insert(&mut self, host: &str, value: V) {
        let host = self.normalize(host);

        match PatternKind::classify(&host) {
            PatternKind::Universal => self.universal = Some(value),
            PatternKind::Exact => {
                self.exact.insert(host.into_owned(), value);
            }
            PatternKind::Suffix => {
                let suffix = &host[1..];
                match self.suffix_index.get(suffix) {
                    Some(&i) => self.suffixes[i].value = value,
                    None => {
                        self.suffix_index
                            .insert(suffix.to_string(), self.suffixes.len());
                        self.suffixes.push(SuffixRule {
                            suffix: suffix.to_string(),
                            value,
                        });
                    }
                }
            }
            PatternKind::Glob => match self.glob_index.get(&*host) {
                Some(&i) => self.globs[i].value = value,
                None => {
                    self.glob_index.insert(host.to_string(), self.globs.len());
                    self.globs.push(GlobRule {
                        pattern: GlobPattern::new(&host),
                        value,
                    });
                }
            },
        }
    }

    /// Lowercase `host` when matching ignores case, only allocating when
    /// uppercase characters are present.
    pub(crate) fn normalize<'a>(&self, host: &'a str) -> Cow<'a, str> {
        if self.options.ignore_case && host.chars().any(char::is_uppercase) {
            Cow::Owned(host.to_lowercase())
        } else {
            Cow::Borrowed(host)
        }
    }

    /// Find the value of the first rule matching `host`
    pub fn lookup(&self, host: &str) -> Option<&V> {
        if let Some(value) = &self.universal {
            return Some(value);
        }

        let normalized = self.normalize(host);
        let host: &str = &normalized;

        if let Some(value) = self.exact.get(host) {
            return Some(value);
        }

        if let Some(rule) = self.suffixes.iter().find(|r| host.ends_with(&r.suffix)) {
            return Some(&rule.value);
        }

        self.globs
            .iter()
            .find(|r| r.pattern.matches(host))
            .map(|r| &r.value)
    }

    /// Check if any rule matches `host`
    pub fn matches(&self, host: &str) -> bool {
        self.lookup(host).is_some()
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        usize::from(self.universal.is_some())
            + self.exact.len()
            + self.suffixes.len()
            + self.globs.len()
    }

    /// Check if no pattern has been added
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }
}

impl<V: From<Presence>> HostMatcher<V> {
    /// Add a pattern without a value
    pub fn add_host(&mut self, host: &str) {
        self.insert(host, V::from(Presence));
    }
}

impl HostMatcher<Presence> {
    /// Create an existence-only matcher from patterns
    pub fn from_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_values(hosts.into_iter().map(|host| (host, Presence)))
    }
}

impl HostMatcher<String> {
    /// Create a matcher from pattern/string pairs
    pub fn from_strings<I, K, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: AsRef<str>,
        S: Into<String>,
    {
        Self::from_values(hosts.into_iter().map(|(host, value)| (host, value.into())))
    }
}

impl<S: AsRef<str>, V> FromIterator<(S, V)> for HostMatcher<V> {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<S: AsRef<str>, V> Extend<(S, V)> for HostMatcher<V> {
    fn extend<I: IntoIterator<Item = (S, V)>>(&mut self, iter: I) {
        for (host, value) in iter {
            self.insert(host.as_ref(), value);
        }
    }
}
