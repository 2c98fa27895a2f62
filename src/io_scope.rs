//! I/O redirection scope
//!
//! Opens the files named by a stage's redirections and swaps them in as the
//! process's stdout/stderr for the lifetime of one command invocation,
//! restoring the originals on every exit path — success, early return, or
//! panic unwinding. Grounded in the guard-object shape the teacher uses for
//! scoped state elsewhere (acquire in `new`, release in `Drop`), adapted
//! here to real fds instead of in-memory buffers.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::{FromRawFd, IntoRawFd, OwnedFd};
use std::os::unix::io::RawFd;
use std::path::PathBuf;

use crate::errors::RedirectOpenError;
use crate::parser::{RedirectMode, Stage};

fn open_target(redirect: &crate::parser::Redirection) -> Result<File, RedirectOpenError> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true);
    match redirect.mode {
        RedirectMode::Truncate => opts.truncate(true),
        RedirectMode::Append => opts.append(true),
    };
    opts.open(&redirect.target).map_err(|source| RedirectOpenError {
        context: PathBuf::from(&redirect.target),
        source,
    })
}

/// Duplicates fd 1 and/or fd 2 onto the files named in `stage`'s redirects,
/// for the duration of its scope, restoring the saved originals on `Drop`.
///
/// Only applies to the current process's own stdout/stderr — used for
/// built-ins and the non-pipeline fast path. Pipeline stages instead wire
/// `Stdio` directly into spawned children without touching the parent's fds
/// at all.
pub struct IoRedirectScope {
    saved_stdout: Option<OwnedFd>,
    saved_stderr: Option<OwnedFd>,
}

impl IoRedirectScope {
    pub fn apply(stage: &Stage) -> Result<Self, RedirectOpenError> {
        let saved_stdout = if stage.redirects.contains_key(&1) {
            Some(dup_fd(1))
        } else {
            None
        };
        let saved_stderr = if stage.redirects.contains_key(&2) {
            Some(dup_fd(2))
        } else {
            None
        };

        if let Some(redirect) = stage.redirects.get(&1) {
            let file = open_target(redirect)?;
            dup2_onto(file.into_raw_fd(), 1);
        }
        if let Some(redirect) = stage.redirects.get(&2) {
            let file = open_target(redirect)?;
            dup2_onto(file.into_raw_fd(), 2);
        }

        Ok(Self {
            saved_stdout,
            saved_stderr,
        })
    }
}

impl Drop for IoRedirectScope {
    fn drop(&mut self) {
        if let Some(fd) = self.saved_stdout.take() {
            dup2_onto(fd.into_raw_fd(), 1);
        }
        if let Some(fd) = self.saved_stderr.take() {
            dup2_onto(fd.into_raw_fd(), 2);
        }
    }
}

fn dup_fd(fd: RawFd) -> OwnedFd {
    // SAFETY: `fd` (1 or 2) is always open in a running process; `dup`
    // returns a fresh fd we uniquely own.
    unsafe { OwnedFd::from_raw_fd(libc::dup(fd)) }
}

fn dup2_onto(src: RawFd, dst: RawFd) {
    // SAFETY: both fds are valid for the duration of this call; `dup2`
    // closes `dst`'s previous target atomically before rebinding it.
    unsafe {
        libc::dup2(src, dst);
        if src != dst {
            let _ = File::from_raw_fd(src);
        }
    }
}
