//! Shell state
//!
//! Everything evaluation threads through explicitly instead of reaching for
//! process-wide globals: the current working directory (tracked
//! independently of a real `chdir(2)` call's implicit process state, the
//! same way the teacher keeps interpreter state in a struct rather than
//! thread-locals) and the in-memory history log.

use std::path::{Path, PathBuf};

use crate::errors::ChdirError;
use crate::history::HistoryStore;

pub struct ShellState {
    cwd: PathBuf,
    history: HistoryStore,
}

impl ShellState {
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            history: HistoryStore::new(),
        }
    }

    /// Build a state that starts from an existing history rather than an
    /// empty one — used to seed the throwaway state a non-final pipeline
    /// builtin runs against, so `history -w`/`-a` there see the session's
    /// real entries even though the state itself is discarded afterward.
    pub fn with_history(cwd: PathBuf, history: HistoryStore) -> Self {
        Self { cwd, history }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    /// Change `cwd` to `target`, resolved against the current directory.
    /// Fails, leaving `cwd` untouched, if `target` doesn't exist.
    pub fn chdir(&mut self, target: &str) -> Result<(), ChdirError> {
        let candidate = self.cwd.join(target);
        match std::fs::canonicalize(&candidate) {
            Ok(resolved) if resolved.is_dir() => {
                self.cwd = resolved;
                Ok(())
            }
            _ => Err(ChdirError {
                path: target.to_string(),
            }),
        }
    }
}
