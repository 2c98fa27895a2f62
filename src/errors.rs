//! Shell error types.
//!
//! One small error type per layer (lexer, parser, path resolution, history,
//! redirection, spawn), each carrying enough context to format the exact
//! diagnostic strings the shell prints. None of these are fatal: every
//! variant is caught at a dispatch boundary, printed, and control returns
//! to the prompt.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure tokenizing a line.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    #[error("Syntax error: unbalanced quotes")]
    UnbalancedQuotes,
}

/// Failure turning a token slice into an (argv, redirects) pair.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("Syntax error: expected filename after redirection operator")]
    MissingRedirectionTarget,
}

/// A bare command name that does not resolve to anything on `PATH`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{name}: command not found")]
pub struct ResolveError {
    pub name: String,
}

/// `cd` could not find the target directory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cd: {path}: No such file or directory")]
pub struct ChdirError {
    pub path: String,
}

/// `history -r` named a file that doesn't exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("history: {path}: No such file or directory")]
pub struct HistoryFileError {
    pub path: String,
}

/// A redirection target could not be opened.
#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct RedirectOpenError {
    pub context: PathBuf,
    #[source]
    pub source: io::Error,
}

/// An external program failed to spawn for a reason other than "not found"
/// (permission denied, exec format error, etc).
#[derive(Debug, Error)]
#[error("Error: {source}")]
pub struct SpawnError {
    pub program: String,
    #[source]
    pub source: io::Error,
}
