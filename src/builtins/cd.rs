//! `cd` — change the shell's tracked working directory.
//!
//! A leading `~` expands to `$HOME` (literally, and only when it is the
//! first character); everything else is handed to the filesystem
//! unmodified. No `CDPATH` search, no `-` for the previous directory — both
//! out of scope.
//!
//! Unlike every other builtin's diagnostics, the `ENOENT` message goes to
//! stdout, not stderr — that's what the spec calls for here.

use std::io::Write;

use crate::shell::ShellState;

pub fn run(args: &[String], shell: &mut ShellState, out: &mut impl Write) -> i32 {
    let target = match args.first() {
        Some(arg) => expand_tilde(arg),
        None => match std::env::var("HOME") {
            Ok(home) => home,
            Err(_) => return 0,
        },
    };

    match shell.chdir(&target) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(out, "{e}");
            1
        }
    }
}

fn expand_tilde(arg: &str) -> String {
    if let Some(rest) = arg.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with(std::path::MAIN_SEPARATOR) {
            if let Ok(home) = std::env::var("HOME") {
                return format!("{home}{rest}");
            }
        }
    }
    arg.to_string()
}
