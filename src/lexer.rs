//! Lexer
//!
//! A character-driven state machine that turns one input line into a
//! sequence of tokens. Three quoting modes (`NORMAL`, `IN_SINGLE`,
//! `IN_DOUBLE`) and two escape policies: a single backslash escape in
//! `NORMAL`, and a restricted backslash escape inside `IN_DOUBLE` that only
//! weakens `\` and `"` (any other escaped byte keeps its leading backslash).
//!
//! No attribute survives lexing to say whether a token was quoted — quoting
//! only controls how bytes are collected into the token buffer.

use crate::errors::LexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InSingle,
    InDouble,
}

/// Tokenize one line (no trailing newline) into a sequence of non-empty
/// tokens, applying quoting and escape rules.
///
/// Malformed UTF-8 in the input is replaced per `String::from_utf8_lossy` —
/// the lexer itself is byte-driven and only decodes at the end, matching
/// the "locale/encoding policy beyond bytes is out of scope" stance.
pub fn lex(line: &str) -> Result<Vec<String>, LexError> {
    let bytes = lex_bytes(line.as_bytes())?;
    Ok(bytes
        .into_iter()
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .collect())
}

fn lex_bytes(input: &[u8]) -> Result<Vec<Vec<u8>>, LexError> {
    let mut tokens = Vec::new();
    let mut buf: Vec<u8> = Vec::new();
    let mut state = State::Normal;
    let mut escape_next = false;
    let mut double_quote_escape = false;

    for &byte in input {
        match state {
            State::Normal => {
                if escape_next {
                    buf.push(byte);
                    escape_next = false;
                    continue;
                }
                match byte {
                    b'\\' => escape_next = true,
                    b'\'' => state = State::InSingle,
                    b'"' => state = State::InDouble,
                    b' ' => {
                        if !buf.is_empty() {
                            tokens.push(std::mem::take(&mut buf));
                        }
                    }
                    _ => buf.push(byte),
                }
            }
            State::InSingle => {
                if byte == b'\'' {
                    state = State::Normal;
                } else {
                    buf.push(byte);
                }
            }
            State::InDouble => {
                if double_quote_escape {
                    if byte == b'\\' || byte == b'"' {
                        buf.push(byte);
                    } else {
                        buf.push(b'\\');
                        buf.push(byte);
                    }
                    double_quote_escape = false;
                    continue;
                }
                match byte {
                    b'"' => state = State::Normal,
                    b'\\' => double_quote_escape = true,
                    _ => buf.push(byte),
                }
            }
        }
    }

    if state != State::Normal || escape_next || double_quote_escape {
        return Err(LexError::UnbalancedQuotes);
    }

    if !buf.is_empty() {
        tokens.push(buf);
    }

    Ok(tokens)
}
