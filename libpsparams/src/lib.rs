//! PowerShell-style parameter tokenizer.
//!
//! Splits a free-form argument string such as
//! `-Name "value (with) [brackets]" -Flag2 42` into ordered name/value
//! pairs. Values may contain spaces when protected by brackets, quotes, or
//! the escape character.
//!
//! # Parsing Pipeline
//!
//! 1. **Scanner**: Cuts the trimmed input into literals, skipping over
//!    bracket groups, quoted runs and escaped characters.
//!
//! 2. **Tokenizer**: Classifies each literal as a name or a value and folds
//!    them into pairs.
//!
//! Parsing is lenient: an unclosed quote or bracket runs to the end of the
//! input. Use [`parse_strict`] to have those reported instead.

mod cast;
mod encode;
mod error;
mod map;
mod pair;
mod scanner;
mod tokenizer;

pub use cast::{cast_value, ParameterType};
pub use encode::{encode, encode_map, to_command_line, Format};
pub use error::{ParseContext, ParseError, Result};
pub use map::{parse_map, ParameterMap};
pub use pair::NameValuePair;
pub use tokenizer::{ParseOptions, DEFAULT_ESCAPE};

/// Parse a parameter string with default options.
///
/// # Example
///
/// ```
/// use libpsparams::{parse, NameValuePair};
///
/// let pairs = parse("-Name value -Flag");
/// assert_eq!(pairs, vec![
///     NameValuePair::new("Name", "value"),
///     NameValuePair::new("Flag", ""),
/// ]);
/// ```
pub fn parse(input: &str) -> Vec<NameValuePair> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a parameter string, optionally stripping value quotes and using a
/// different escape character for this call only.
///
/// # Example
///
/// ```
/// use libpsparams::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions::default().remove_quotes(true).escape('\\');
/// let pairs = parse_with_options(r#"-location "West US" -tag a\ b"#, &options);
/// assert_eq!(pairs[0].value, "West US");
/// assert_eq!(pairs[1].value, r"a\ b");
/// ```
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Vec<NameValuePair> {
    tokenizer::tokenize(input, options)
}

/// Parse a parameter string, failing on unterminated quotes, unterminated
/// bracket groups, or a trailing escape character.
pub fn parse_strict(input: &str, options: &ParseOptions) -> Result<Vec<NameValuePair>> {
    parse_strict_with_source(input, options, None)
}

/// Parse strictly with a source name for error messages.
pub fn parse_strict_with_source(
    input: &str,
    options: &ParseOptions,
    source: Option<&str>,
) -> Result<Vec<NameValuePair>> {
    let ctx = ParseContext::new(source);
    tokenizer::tokenize_strict(input, options, &ctx)
}
