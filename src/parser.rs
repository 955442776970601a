use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::error::{HostMatcherError, Result};
use crate::types::HostEntry;

/// Regex pattern for parsing host rules
/// Format: pattern[ = value]
static ENTRY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^\s=,]+)\s*(?:=\s*(.*))?$")
        .expect("ENTRY_PATTERN: hardcoded regex is invalid")
});

/// Separators in NO_PROXY-style host lists
static LIST_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,]+").expect("LIST_SEPARATOR: hardcoded regex is invalid"));

/// Maximum nesting depth for `file:` include directives.
pub const MAX_INCLUDE_DEPTH: usize = 10;

/// Parse host rules from text.
///
/// One rule per line, either `pattern` or `pattern = value`. `#` starts a
/// comment. Supports `file: /path/to/hosts.txt` to include rules from
/// an external file at that position.
pub fn parse_hosts(text: &str) -> Result<Vec<HostEntry>> {
    parse_hosts_inner(text, 0)
}

fn parse_hosts_inner(text: &str, depth: usize) -> Result<Vec<HostEntry>> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(HostMatcherError::ParseError(format!(
            "file include depth exceeds maximum ({MAX_INCLUDE_DEPTH}), possible circular include"
        )));
    }

    let mut entries = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers

        // Remove comments and trim whitespace
        let line = match line.find('#') {
            Some(comment_pos) => &line[..comment_pos],
            None => line,
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(path) = line.strip_prefix("file:") {
            let file_entries = parse_hosts_from_file_inner(path.trim(), depth + 1)?;
            entries.extend(file_entries);
            continue;
        }

        entries.push(parse_single_entry(line, line_num)?);
    }

    Ok(entries)
}

/// Parse host rules from a file.
pub fn parse_hosts_from_file(path: impl AsRef<Path>) -> Result<Vec<HostEntry>> {
    parse_hosts_from_file_inner(path, 0)
}

fn parse_hosts_from_file_inner(path: impl AsRef<Path>, depth: usize) -> Result<Vec<HostEntry>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        HostMatcherError::ParseError(format!(
            "Failed to read hosts file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_hosts_inner(&text, depth)
}

fn parse_single_entry(line: &str, line_num: usize) -> Result<HostEntry> {
    let captures = ENTRY_PATTERN
        .captures(line)
        .ok_or_else(|| HostMatcherError::ParseErrorAtLine {
            line: line_num,
            message: format!("Invalid host entry: {}", line),
        })?;

    let pattern = captures[1].to_string();
    let value = match captures.get(2) {
        Some(m) if m.as_str().trim().is_empty() => {
            return Err(HostMatcherError::ParseErrorAtLine {
                line: line_num,
                message: format!("Empty value for {}", pattern),
            });
        }
        Some(m) => Some(m.as_str().trim().to_string()),
        None => None,
    };

    Ok(HostEntry {
        pattern,
        value,
        line_num,
    })
}

/// Split a NO_PROXY-style list (`"localhost, *.corp 10.*.*.*"`) into patterns.
pub fn parse_host_list(list: &str) -> Vec<String> {
    LIST_SEPARATOR
        .split(list)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_pattern_regex_compiles() {
        assert!(ENTRY_PATTERN.is_match("example.com"));
        assert!(LIST_SEPARATOR.is_match(","));
    }

    #[test]
    fn test_parse_simple_entry() {
        let entries = parse_hosts("example.com").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].pattern, "example.com");
        assert!(entries[0].value.is_none());
        assert_eq!(entries[0].line_num, 1);
    }

    #[test]
    fn test_parse_entry_with_value() {
        let entries = parse_hosts("*.corp.net = upstream-a").unwrap();
        assert_eq!(entries[0].pattern, "*.corp.net");
        assert_eq!(entries[0].value.as_deref(), Some("upstream-a"));

        let entries = parse_hosts("*=direct").unwrap();
        assert_eq!(entries[0].pattern, "*");
        assert_eq!(entries[0].value.as_deref(), Some("direct"));
    }

    #[test]
    fn test_value_may_contain_spaces() {
        let entries = parse_hosts("intranet = via corp proxy").unwrap();
        assert_eq!(entries[0].value.as_deref(), Some("via corp proxy"));
    }

    #[test]
    fn test_parse_multiple_entries() {
        let text = r#"
# Local
localhost
127.0.0.1

# Corporate
*.corp.example.com = corp
10.*.*.*           = lan

*
"#;
        let entries = parse_hosts(text).unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].line_num, 3);
        assert_eq!(entries[2].value.as_deref(), Some("corp"));
        assert_eq!(entries[4].pattern, "*");
    }

    #[test]
    fn test_parse_inline_comment() {
        let entries = parse_hosts("example.com = direct # skip proxy").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value.as_deref(), Some("direct"));
    }

    #[test]
    fn test_parse_invalid_entry() {
        let err = parse_hosts("ok.com\nbad entry.com").unwrap_err();
        match err {
            HostMatcherError::ParseErrorAtLine { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }

        assert!(parse_hosts("a.com,b.com").is_err());
        assert!(parse_hosts("= value").is_err());
    }

    #[test]
    fn test_parse_empty_value() {
        let err = parse_hosts("example.com =").unwrap_err();
        assert!(matches!(err, HostMatcherError::ParseErrorAtLine { line: 1, .. }));
    }

    #[test]
    fn test_parse_file_directive() {
        use std::io::Write;
        let dir = std::env::temp_dir().join("hostmatcher_test");
        let _ = fs::create_dir_all(&dir);
        let file_path = dir.join("test_hosts.txt");
        let mut f = fs::File::create(&file_path).unwrap();
        writeln!(f, "*.google.com = proxy").unwrap();
        writeln!(f, "10.*.*.*").unwrap();
        drop(f);

        let text = format!(
            "localhost\nfile: {}\n* = direct",
            file_path.display()
        );
        let entries = parse_hosts(&text).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].pattern, "localhost");
        assert_eq!(entries[1].pattern, "*.google.com");
        assert_eq!(entries[2].pattern, "10.*.*.*");
        assert_eq!(entries[3].pattern, "*");

        let _ = fs::remove_file(&file_path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_parse_file_directive_not_found() {
        let result = parse_hosts("file: /nonexistent/path/hosts.txt");
        assert!(matches!(result, Err(HostMatcherError::ParseError(_))));
    }

    #[test]
    fn test_parse_file_directive_circular() {
        let dir = std::env::temp_dir().join("hostmatcher_test_circular");
        let _ = fs::create_dir_all(&dir);
        let file_path = dir.join("self.txt");
        fs::write(&file_path, format!("file: {}\n", file_path.display())).unwrap();

        let err = parse_hosts_from_file(&file_path).unwrap_err();
        assert!(err.to_string().contains("depth exceeds"), "got: {}", err);

        let _ = fs::remove_file(&file_path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_parse_host_list() {
        assert_eq!(
            parse_host_list("localhost, *.corp.net,10.*.*.*  .internal\n"),
            vec!["localhost", "*.corp.net", "10.*.*.*", ".internal"]
        );
        assert!(parse_host_list("").is_empty());
        assert!(parse_host_list(" , ,").is_empty());
    }
}
