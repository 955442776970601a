use thiserror::Error;

/// Host matcher error types.
///
/// Matching itself never fails; these only come from loading rule text.
#[derive(Error, Debug)]
pub enum HostMatcherError {
    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, HostMatcherError>;
