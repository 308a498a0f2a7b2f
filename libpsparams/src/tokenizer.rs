//! Phase 2: Tokenizer
//!
//! Classifies each literal from the scanner as a name token or a value
//! token and folds them into name/value pairs:
//! - A name token starts with `-`, saw no special character, and is not a
//!   number (so `-5` stays a value).
//! - A name token flushes a pending named pair (with an empty value).
//! - A value token completes the pending pair, named or not.

use tracing::{debug, trace};

use crate::error::{ParseContext, ParseError, Result};
use crate::pair::NameValuePair;
use crate::scanner::{ScanIssue, Scanner};

/// Escape character used when none is configured.
pub const DEFAULT_ESCAPE: char = '`';

/// Per-call tokenizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Strip one outer pair of double quotes from each value.
    pub remove_quotes: bool,
    /// Character that protects the character after it.
    pub escape: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            remove_quotes: false,
            escape: DEFAULT_ESCAPE,
        }
    }
}

impl ParseOptions {
    pub fn remove_quotes(mut self, remove_quotes: bool) -> Self {
        self.remove_quotes = remove_quotes;
        self
    }

    pub fn escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }
}

/// Tokenize with the given options, ignoring structural issues.
pub fn tokenize(input: &str, options: &ParseOptions) -> Vec<NameValuePair> {
    tokenize_with_issue(input, options).0
}

/// Tokenize and fail on the first unterminated quote, unterminated group or
/// trailing escape.
pub fn tokenize_strict(
    input: &str,
    options: &ParseOptions,
    ctx: &ParseContext,
) -> Result<Vec<NameValuePair>> {
    let (pairs, issue) = tokenize_with_issue(input, options);
    match issue {
        None => Ok(pairs),
        Some(issue) => Err(issue_to_error(issue).with_source(ctx)),
    }
}

fn tokenize_with_issue(
    input: &str,
    options: &ParseOptions,
) -> (Vec<NameValuePair>, Option<ScanIssue>) {
    let input = trim_input(input);
    let mut scanner = Scanner::new(input, options.escape);
    let mut result = Vec::new();
    let mut current = NameValuePair::default();
    let mut literal_count = 0;
    let mut pos = 0;

    while pos < scanner.input_len() {
        let literal = scanner.next_literal(pos);
        let raw = scanner.text(&literal);
        let text = trim_input(&raw);
        literal_count += 1;

        if is_name(text, literal.special) {
            trace!(literal = text, "name token");
            if !current.name.is_empty() {
                result.push(std::mem::take(&mut current));
            }
            current.name = text[1..].to_string();
        } else {
            trace!(literal = text, special = literal.special, "value token");
            current.value = text.to_string();
            result.push(std::mem::take(&mut current));
        }

        pos = literal.next;
    }

    // Trailing flag with no value
    if !current.name.is_empty() {
        result.push(current);
    }

    if options.remove_quotes {
        for pair in &mut result {
            if let Some(inner) = strip_outer_quotes(&pair.value) {
                pair.value = inner.to_string();
            }
        }
    }

    debug!(
        literals = literal_count,
        pairs = result.len(),
        escape = %options.escape,
        "tokenized parameters"
    );

    (result, scanner.issue())
}

fn issue_to_error(issue: ScanIssue) -> ParseError {
    match issue {
        ScanIssue::UnterminatedQuote { quote, at } => {
            ParseError::UnterminatedQuote(quote, at, String::new())
        }
        ScanIssue::UnterminatedGroup { opener, at } => {
            ParseError::UnterminatedGroup(opener, at, String::new())
        }
        ScanIssue::TrailingEscape { at } => ParseError::TrailingEscape(at, String::new()),
    }
}

/// Trim whitespace, including a stray byte order mark.
fn trim_input(input: &str) -> &str {
    input.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Check whether a literal names a parameter.
fn is_name(literal: &str, special: bool) -> bool {
    literal.starts_with('-') && !special && !is_number(literal)
}

/// Check whether a `-`-prefixed literal is a negative number.
/// Accepts `-Infinity` and decimal forms such as `-5`, `-.5`, `-5.`, `-1e3`.
fn is_number(literal: &str) -> bool {
    let digits = &literal[1..];
    if digits == "Infinity" {
        return true;
    }
    match digits.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '.' => {}
        _ => return false,
    }
    digits
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && digits.parse::<f64>().is_ok()
}

/// Return the interior of a value wrapped in one pair of double quotes.
/// Values spanning lines are left alone.
pub(crate) fn strip_outer_quotes(value: &str) -> Option<&str> {
    if value.len() < 2 || !value.starts_with('"') || !value.ends_with('"') {
        return None;
    }
    let inner = &value[1..value.len() - 1];
    if inner.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return None;
    }
    Some(inner)
}
