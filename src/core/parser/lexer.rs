//! Splits a command line into words.
//!
//! Quoting and escaping are resolved here, so the words handed to the
//! command builder carry no quote characters. Inside single quotes every
//! character is literal, including the backslash. Elsewhere a backslash
//! makes the following character literal.

use std::mem;

use crate::errors::{ErrorKind, Result};

const SINGLE_QUOTE: char = '\'';
const DOUBLE_QUOTE: char = '"';
const ESCAPE: char = '\\';
const COMMENT: char = '#';

/// Splits `line` into words.
///
/// # Examples
///
/// ```
/// use simsh::core::parser::lexer::tokenize;
///
/// let words = tokenize(r#"echo "a b" c"#).unwrap();
/// assert_eq!(words, vec!["echo", "a b", "c"]);
/// ```
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escaped_next = false;

    for c in line.chars() {
        if escaped_next {
            current.push(c);
            escaped_next = false;
        } else if in_single_quote {
            if c == SINGLE_QUOTE {
                in_single_quote = false;
            } else {
                current.push(c);
            }
        } else if c == ESCAPE {
            escaped_next = true;
        } else if in_double_quote {
            if c == DOUBLE_QUOTE {
                in_double_quote = false;
            } else {
                current.push(c);
            }
        } else {
            match c {
                SINGLE_QUOTE => in_single_quote = true,
                DOUBLE_QUOTE => in_double_quote = true,
                ' ' | '\t' => flush(&mut tokens, &mut current),
                _ => current.push(c),
            }
        }
    }
    flush(&mut tokens, &mut current);

    if in_single_quote || in_double_quote {
        bail!(ErrorKind::UnterminatedQuote);
    }
    if escaped_next {
        bail!(ErrorKind::TrailingEscape);
    }

    Ok(tokens)
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(mem::take(current));
    }
}

/// Returns `line` up to the first `#` that is neither quoted nor escaped.
pub fn strip_comment(line: &str) -> &str {
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escaped_next = false;

    for (i, c) in line.char_indices() {
        if escaped_next {
            escaped_next = false;
            continue;
        }

        match c {
            ESCAPE if !in_single_quote => escaped_next = true,
            SINGLE_QUOTE if !in_double_quote => in_single_quote = !in_single_quote,
            DOUBLE_QUOTE if !in_single_quote => in_double_quote = !in_double_quote,
            COMMENT if !in_single_quote && !in_double_quote => return line[..i].trim_end(),
            _ => {}
        }
    }

    line
}
