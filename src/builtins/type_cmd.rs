//! `type` — classify a command name as a builtin, an external on `PATH`, or
//! unknown.

use std::io::Write;

use super::is_builtin_name;
use crate::path;

pub fn run(args: &[String], out: &mut impl Write) -> i32 {
    let Some(name) = args.first() else {
        return 0;
    };

    if is_builtin_name(name) {
        let _ = writeln!(out, "{name} is a shell builtin");
        return 0;
    }

    match path::resolve(name) {
        Some(resolved) => {
            let _ = writeln!(out, "{name} is {}", resolved.display());
            0
        }
        None => {
            let _ = writeln!(out, "{name}: not found");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_shell_builtins() {
        let mut buf = Vec::new();
        let code = run(&["echo".to_string()], &mut buf);
        assert_eq!(code, 0);
        assert_eq!(buf, b"echo is a shell builtin\n");
    }

    #[test]
    fn reports_unresolved_names_as_not_found() {
        let mut buf = Vec::new();
        // SAFETY: single-threaded test process.
        unsafe {
            std::env::set_var("PATH", "/nonexistent-dir-xyz");
        }
        let code = run(&["totally-not-a-real-binary-xyz".to_string()], &mut buf);
        assert_eq!(code, 1);
        assert_eq!(buf, b"totally-not-a-real-binary-xyz: not found\n");
    }
}
