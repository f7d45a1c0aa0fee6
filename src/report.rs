//! Error reports rendered against the original source text.
//!
//! A report names the problem, prints the offending source line with its
//! line number, puts a caret under the failing column and follows it with a
//! few lines of context.

use crate::lexer::{LexError, Token};

/// Lines of source shown after the offending one.
const CONTEXT_LINES: usize = 4;

/// Report for a parse failure at token index `at`, or at end of input when `at` is `None`.
pub fn render_parse_failure(source: &str, tokens: &[Token], at: Option<usize>) -> String {
    render_at("Parse error:", source, tokens, at)
}

/// Warning for tokens left over after a program, starting at token index `at`.
pub fn render_extra_tokens(source: &str, tokens: &[Token], at: usize) -> String {
    render_at("Warning: ignoring the rest of the file:", source, tokens, Some(at))
}

fn render_at(heading: &str, source: &str, tokens: &[Token], at: Option<usize>) -> String {
    let mut out = format!("{}\n", heading);

    match at.and_then(|index| tokens.get(index)) {
        Some(token) => {
            out.push_str(&format!("Unexpected {}\n", token));
            let start = token.location.start();
            excerpt(&mut out, source, start.line, start.column);
        }
        None => {
            out.push_str("Unexpected end of file\n");
            end_of_file_excerpt(&mut out, source);
        }
    }

    out
}

/// Report for a failure that stopped parsing outright, with its reason.
pub fn render_unrecoverable(source: &str, tokens: &[Token], at: Option<usize>, reason: &str) -> String {
    let mut out = render_parse_failure(source, tokens, at);
    out.push_str(&format!("Reason: {}\n", reason));
    out
}

/// Report for a lexical error.
pub fn render_lex_error(source: &str, err: &LexError) -> String {
    let mut out = format!("Tokenize error: {}\n", err);
    let position = err.position();
    excerpt(&mut out, source, position.line, position.column);
    out
}

fn numbered(out: &mut String, number: usize, text: &str) {
    out.push_str(&format!("{:>3}  {}\n", number, text));
}

/// Caret under byte `column` of `text`, keeping tabs so it stays aligned.
fn caret(out: &mut String, text: &str, column: usize) {
    out.push_str("     ");
    let padding: String = text
        .bytes()
        .chain(std::iter::repeat(b' '))
        .take(column)
        .map(|b| if b == b'\t' { '\t' } else { ' ' })
        .collect();
    out.push_str(&padding);
    out.push_str("^\n");
}

fn excerpt(out: &mut String, source: &str, line: usize, column: usize) {
    let lines: Vec<&str> = source.lines().collect();
    let index = line.saturating_sub(1);
    let text = lines.get(index).copied().unwrap_or("");

    numbered(out, line, text);
    caret(out, text, column);
    for (offset, following) in lines.iter().skip(index + 1).take(CONTEXT_LINES).enumerate() {
        numbered(out, line + offset + 1, following);
    }
}

fn end_of_file_excerpt(out: &mut String, source: &str) {
    let lines: Vec<&str> = source.lines().collect();
    let (number, text) = match lines.last() {
        Some(last) => (lines.len(), *last),
        None => (1, ""),
    };

    numbered(out, number, text);
    caret(out, text, text.len());
}
