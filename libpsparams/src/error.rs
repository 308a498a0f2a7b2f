//! Error types for strict parsing, keyed lookup and typed casting.
//!
//! The lenient tokenizer never fails; these errors only come out of the
//! opt-in surfaces built on top of it.

use thiserror::Error;

/// Result type for parameter operations that can fail.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying the input's origin for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub source: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(source: Option<&str>) -> Self {
        Self {
            source: source.map(String::from),
        }
    }

    /// Format a source suffix for error messages.
    pub fn source_suffix(&self) -> String {
        match &self.source {
            Some(name) => format!(" in <{}>", name),
            None => String::new(),
        }
    }
}

/// Error type for parameter parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A quoted literal was never closed.
    #[error("Unterminated {0} quote starting at offset {1}{2}")]
    UnterminatedQuote(char, usize, String),

    /// A bracket group was never closed.
    #[error("Unterminated \"{0}\" group starting at offset {1}{2}")]
    UnterminatedGroup(char, usize, String),

    /// The escape character was the last character of the input.
    #[error("Trailing escape character at offset {0}{1}")]
    TrailingEscape(usize, String),

    /// A required parameter was not supplied.
    #[error("Missing required parameter \"{0}\"{1}")]
    MissingParameter(String, String),

    /// A value could not be converted to its declared type.
    #[error("Invalid {type_name} value: {message}")]
    InvalidValue { type_name: String, message: String },
}

impl ParseError {
    /// Attach the context's source to the error message.
    pub fn with_source(self, ctx: &ParseContext) -> Self {
        let suffix = ctx.source_suffix();
        match self {
            ParseError::UnterminatedQuote(q, at, _) => ParseError::UnterminatedQuote(q, at, suffix),
            ParseError::UnterminatedGroup(g, at, _) => ParseError::UnterminatedGroup(g, at, suffix),
            ParseError::TrailingEscape(at, _) => ParseError::TrailingEscape(at, suffix),
            ParseError::MissingParameter(name, _) => ParseError::MissingParameter(name, suffix),
            err @ ParseError::InvalidValue { .. } => err,
        }
    }

    /// Character offset into the trimmed input, for scan errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::UnterminatedQuote(_, at, _)
            | ParseError::UnterminatedGroup(_, at, _)
            | ParseError::TrailingEscape(at, _) => Some(*at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_without_source() {
        let err = ParseError::UnterminatedQuote('"', 3, String::new());
        assert_eq!(err.to_string(), "Unterminated \" quote starting at offset 3");
    }

    #[test]
    fn test_with_source() {
        let ctx = ParseContext::new(Some("overrides.txt"));
        let err = ParseError::TrailingEscape(7, String::new()).with_source(&ctx);
        assert_eq!(
            err.to_string(),
            "Trailing escape character at offset 7 in <overrides.txt>"
        );
        assert_eq!(err.offset(), Some(7));
    }

    #[test]
    fn test_missing_parameter() {
        let err = ParseError::MissingParameter("xml".to_string(), String::new());
        assert_eq!(err.to_string(), "Missing required parameter \"xml\"");
        assert_eq!(err.offset(), None);
    }
}
