//! Phase 1: Literal scanner
//!
//! The scanner walks the trimmed input and cuts it into literals. A literal
//! ends at the first space or tab that is not protected by:
//! - a bracket group (`(...)`, `[...]`, `{...}`), nested to any depth
//! - a quoted run (`"..."` or `'...'`), not nested
//! - the escape character, which protects exactly the next character
//!
//! Any of those marks the literal as containing a special character. Groups
//! that are never closed run to the end of the input; the first such issue
//! is remembered so strict parsing can report it.

/// A structural problem tolerated during the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanIssue {
    /// Quote opened at `at` was never closed.
    UnterminatedQuote { quote: char, at: usize },
    /// Bracket opened at `at` was never closed.
    UnterminatedGroup { opener: char, at: usize },
    /// Escape character at `at` had nothing after it.
    TrailingEscape { at: usize },
}

/// A single literal located by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    /// Character index of the first character.
    pub start: usize,
    /// Character index one past the last character.
    pub end: usize,
    /// Character index where the following literal starts.
    pub next: usize,
    /// Whether a bracket, quote or escape was seen.
    pub special: bool,
}

/// Per-call scanning state. Owns the escape character so concurrent parses
/// never share configuration.
pub struct Scanner {
    chars: Vec<char>,
    escape: char,
    issue: Option<ScanIssue>,
}

impl Scanner {
    /// Create a scanner over already trimmed input.
    pub fn new(input: &str, escape: char) -> Self {
        Self {
            chars: input.chars().collect(),
            escape,
            issue: None,
        }
    }

    /// Number of characters in the input.
    pub fn input_len(&self) -> usize {
        self.chars.len()
    }

    /// First structural issue seen so far.
    pub fn issue(&self) -> Option<ScanIssue> {
        self.issue
    }

    /// The raw text of a literal, untrimmed.
    pub fn text(&self, literal: &Literal) -> String {
        self.chars[literal.start..literal.end].iter().collect()
    }

    /// Locate the literal starting at `start` and the start of the next one.
    pub fn next_literal(&mut self, start: usize) -> Literal {
        let (end, special) = self.find_literal_end(start);
        let mut next = end;
        while next < self.chars.len() && is_separator(self.chars[next]) {
            next += 1;
        }
        Literal {
            start,
            end,
            next,
            special,
        }
    }

    fn find_literal_end(&mut self, start: usize) -> (usize, bool) {
        let len = self.chars.len();
        let mut special = false;
        let mut pos = start;

        while pos < len {
            let ch = self.chars[pos];
            if is_separator(ch) {
                return (pos, special);
            }
            match ch {
                '(' | '[' | '{' => {
                    pos = self.skip_group(pos);
                    special = true;
                }
                '"' | '\'' => {
                    pos = self.skip_quote(pos);
                    special = true;
                }
                c if c == self.escape => {
                    pos = self.skip_escape(pos);
                    special = true;
                }
                _ => {}
            }
            pos += 1;
        }

        (len, special)
    }

    /// Skip the bracket group opened at `open`. Returns the index of its
    /// closer, or the input length when it is never closed.
    ///
    /// Nesting is tracked on an explicit stack. Only the innermost group's
    /// closer ends it; a mismatched closer is an ordinary character.
    fn skip_group(&mut self, open: usize) -> usize {
        let len = self.chars.len();
        let mut stack = vec![(closer_for(self.chars[open]), open)];
        let mut pos = open + 1;

        while pos < len {
            let ch = self.chars[pos];
            let (closer, _) = stack[stack.len() - 1];
            if ch == closer {
                stack.pop();
                if stack.is_empty() {
                    return pos;
                }
            } else {
                match ch {
                    '(' | '[' | '{' => stack.push((closer_for(ch), pos)),
                    '"' | '\'' => pos = self.skip_quote(pos),
                    c if c == self.escape => pos = self.skip_escape(pos),
                    _ => {}
                }
            }
            pos += 1;
        }

        if let Some(&(_, at)) = stack.last() {
            self.record(ScanIssue::UnterminatedGroup {
                opener: self.chars[at],
                at,
            });
        }
        len
    }

    /// Skip the quoted run opened at `open`. Returns the index of the
    /// closing quote, or the input length when it is never closed.
    fn skip_quote(&mut self, open: usize) -> usize {
        let len = self.chars.len();
        let quote = self.chars[open];
        let mut pos = open + 1;

        while pos < len {
            let ch = self.chars[pos];
            if ch == quote {
                return pos;
            }
            if ch == self.escape {
                pos = self.skip_escape(pos);
            }
            pos += 1;
        }

        self.record(ScanIssue::UnterminatedQuote { quote, at: open });
        len
    }

    /// Returns the index of the escaped character, or the input length
    /// when the escape is the last character.
    fn skip_escape(&mut self, at: usize) -> usize {
        if at + 1 < self.chars.len() {
            at + 1
        } else {
            self.record(ScanIssue::TrailingEscape { at });
            self.chars.len()
        }
    }

    fn record(&mut self, issue: ScanIssue) {
        if self.issue.is_none() {
            self.issue = Some(issue);
        }
    }
}

/// Whitespace that separates literals. Newlines are not separators.
fn is_separator(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

fn closer_for(opener: char) -> char {
    match opener {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(input: &str, escape: char) -> Vec<(String, bool)> {
        let mut scanner = Scanner::new(input, escape);
        let mut out = Vec::new();
        let mut pos = 0;
        while pos < scanner.input_len() {
            let lit = scanner.next_literal(pos);
            out.push((scanner.text(&lit), lit.special));
            pos = lit.next;
        }
        out
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(
            literals("-a b\t\t-c", '`'),
            vec![
                ("-a".to_string(), false),
                ("b".to_string(), false),
                ("-c".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_newline_is_not_a_separator() {
        assert_eq!(
            literals("a\nb c", '`'),
            vec![("a\nb".to_string(), false), ("c".to_string(), false)]
        );
    }

    #[test]
    fn test_nested_groups() {
        let lits = literals("-x (a [b {c d}] e) f", '`');
        assert_eq!(lits[1], ("(a [b {c d}] e)".to_string(), true));
        assert_eq!(lits[2], ("f".to_string(), false));
    }

    #[test]
    fn test_mismatched_closer_is_ordinary() {
        let lits = literals("(a ] b) c", '`');
        assert_eq!(
            lits,
            vec![("(a ] b)".to_string(), true), ("c".to_string(), false)]
        );
    }

    #[test]
    fn test_quotes_do_not_nest() {
        let lits = literals("\"a 'b\" c'", '`');
        assert_eq!(lits[0], ("\"a 'b\"".to_string(), true));
        // The stray single quote runs to the end.
        assert_eq!(lits[1], ("c'".to_string(), true));
    }

    #[test]
    fn test_quote_inside_group_hides_closer() {
        let lits = literals("(a \")\" b) c", '`');
        assert_eq!(lits[0], ("(a \")\" b)".to_string(), true));
        assert_eq!(lits[1], ("c".to_string(), false));
    }

    #[test]
    fn test_escape_protects_space_and_quote() {
        let lits = literals("a`\"b c\\ d", '`');
        assert_eq!(lits[0], ("a`\"b".to_string(), true));
        assert_eq!(lits[1], ("c\\".to_string(), false));

        let lits = literals("c\\ d", '\\');
        assert_eq!(lits, vec![("c\\ d".to_string(), true)]);
    }

    #[test]
    fn test_escaped_closer_inside_group() {
        let lits = literals("(a `) b) c", '`');
        assert_eq!(
            lits,
            vec![("(a `) b)".to_string(), true), ("c".to_string(), false)]
        );
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        let lits = literals("\"b`\" c\" d", '`');
        assert_eq!(
            lits,
            vec![("\"b`\" c\"".to_string(), true), ("d".to_string(), false)]
        );

        let lits = literals("-p \"a\\\" b\" -x 1", '\\');
        assert_eq!(lits[1], ("\"a\\\" b\"".to_string(), true));
        assert_eq!(lits[2], ("-x".to_string(), false));
        assert_eq!(lits.len(), 4);
    }

    #[test]
    fn test_unterminated_group_runs_to_end() {
        let mut scanner = Scanner::new("-a (b c", '`');
        let first = scanner.next_literal(0);
        let second = scanner.next_literal(first.next);
        assert_eq!(scanner.text(&second), "(b c");
        assert_eq!(second.next, scanner.input_len());
        assert_eq!(
            scanner.issue(),
            Some(ScanIssue::UnterminatedGroup { opener: '(', at: 3 })
        );
    }

    #[test]
    fn test_innermost_issue_wins() {
        let mut scanner = Scanner::new("[a \"b", '`');
        scanner.next_literal(0);
        assert_eq!(
            scanner.issue(),
            Some(ScanIssue::UnterminatedQuote { quote: '"', at: 3 })
        );
    }

    #[test]
    fn test_trailing_escape() {
        let mut scanner = Scanner::new("a`", '`');
        let lit = scanner.next_literal(0);
        assert_eq!(scanner.text(&lit), "a`");
        assert!(lit.special);
        assert_eq!(scanner.issue(), Some(ScanIssue::TrailingEscape { at: 1 }));
    }

    #[test]
    fn test_deep_nesting() {
        let input = format!("{}{}", "(".repeat(10_000), ")".repeat(10_000));
        let mut scanner = Scanner::new(&input, '`');
        let lit = scanner.next_literal(0);
        assert_eq!(lit.end, input.len());
        assert_eq!(scanner.issue(), None);
    }
}
