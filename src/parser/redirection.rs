//! Redirection parser
//!
//! Turns a token slice into an executable `Stage`: an argv plus a map of at
//! most one redirection per fd. Operators are recognized by exact token
//! match only — `1>>` is an operator, `1>>junk` is not.

use std::collections::HashMap;

use crate::errors::ParseError;

/// Whether a redirection target is opened for truncating writes or for
/// append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    Truncate,
    Append,
}

/// A single fd → file binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub fd: i32,
    pub target: String,
    pub mode: RedirectMode,
}

/// A parsed command: its argument vector and its redirections, keyed by fd
/// so a later operator for the same fd overwrites an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage {
    pub argv: Vec<String>,
    pub redirects: HashMap<i32, Redirection>,
}

impl Stage {
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

fn operator(token: &str) -> Option<(i32, RedirectMode)> {
    match token {
        ">" | "1>" => Some((1, RedirectMode::Truncate)),
        ">>" | "1>>" => Some((1, RedirectMode::Append)),
        "2>" => Some((2, RedirectMode::Truncate)),
        "2>>" => Some((2, RedirectMode::Append)),
        _ => None,
    }
}

/// Parse one stage's tokens into argv + redirects. `argv` may come back
/// empty — callers treat an empty stage as "no command" and skip it.
pub fn parse_stage(tokens: &[String]) -> Result<Stage, ParseError> {
    let mut stage = Stage::default();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        if let Some((fd, mode)) = operator(token) {
            let target = iter
                .next()
                .ok_or(ParseError::MissingRedirectionTarget)?
                .clone();
            stage.redirects.insert(
                fd,
                Redirection {
                    fd,
                    target,
                    mode,
                },
            );
        } else {
            stage.argv.push(token.clone());
        }
    }

    Ok(stage)
}
