//! Path resolver
//!
//! Searches `PATH` for a bare command name. A name containing a path
//! separator is never looked up here — the executor passes it straight to
//! the OS and lets `exec` fail if it doesn't exist.

use std::env;
use std::path::{Path, PathBuf};

/// Resolve `name` against `PATH`. Returns the full path of the first
/// existing, user-executable match, directories searched in order.
///
/// A name containing a path separator is returned unresolved (`None`) —
/// callers should pass such names through to the OS untouched rather than
/// treating a miss here as "not found".
pub fn resolve(name: &str) -> Option<PathBuf> {
    if name.contains(std::path::MAIN_SEPARATOR) {
        return None;
    }

    let path_var = env::var_os("PATH").unwrap_or_default();
    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if is_user_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(unix)]
fn is_user_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_user_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn name_with_slash_is_never_looked_up() {
        assert_eq!(resolve("./foo"), None);
        assert_eq!(resolve("/usr/bin/foo"), None);
    }

    #[test]
    fn finds_executable_on_path() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("myprog");
        fs::write(&exe, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

        let path_var = format!("{}:/nonexistent", dir.path().display());
        // SAFETY: single-threaded test process; no other thread reads PATH concurrently.
        unsafe {
            env::set_var("PATH", &path_var);
        }
        assert_eq!(resolve("myprog"), Some(exe));
        // SAFETY: see above.
        unsafe {
            env::remove_var("PATH");
        }
    }

    #[test]
    fn skips_non_executable_entries() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notexec");
        fs::write(&file, "data").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();

        // SAFETY: single-threaded test process.
        unsafe {
            env::set_var("PATH", dir.path());
        }
        assert_eq!(resolve("notexec"), None);
        // SAFETY: see above.
        unsafe {
            env::remove_var("PATH");
        }
    }

    #[test]
    fn unset_path_behaves_as_empty() {
        // SAFETY: single-threaded test process.
        unsafe {
            env::remove_var("PATH");
        }
        assert_eq!(resolve("ls"), None);
    }
}
