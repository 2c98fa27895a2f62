//! `history` — list, load, or flush the session's command history.
//!
//! ```text
//! history [n]        print the last n entries (or all of them)
//! history -r path    load entries from path (does not move the write cursor)
//! history -w path    overwrite path with every entry
//! history -a path    append entries written since the last -w/-a
//! ```

use std::io::Write;
use std::path::Path;

use crate::shell::ShellState;

pub fn run(args: &[String], shell: &mut ShellState, out: &mut impl Write, err: &mut impl Write) -> i32 {
    match args {
        [] => {
            print_entries(shell, None, out);
            0
        }
        [n] if n.parse::<usize>().is_ok() => {
            let limit = n.parse::<usize>().unwrap();
            print_entries(shell, Some(limit), out);
            0
        }
        [flag, path] if flag == "-r" => match shell.history_mut().read_file(Path::new(path)) {
            Ok(()) => 0,
            Err(e) => {
                let _ = writeln!(err, "{e}");
                1
            }
        },
        [flag, path] if flag == "-w" => match shell.history_mut().write_file(Path::new(path)) {
            Ok(()) => 0,
            Err(e) => {
                let _ = writeln!(err, "history: {path}: {e}");
                1
            }
        },
        [flag, path] if flag == "-a" => match shell.history_mut().append_file(Path::new(path)) {
            Ok(()) => 0,
            Err(e) => {
                let _ = writeln!(err, "history: {path}: {e}");
                1
            }
        },
        _ => {
            let _ = writeln!(err, "history: invalid arguments");
            1
        }
    }
}

fn print_entries(shell: &ShellState, limit: Option<usize>, out: &mut impl Write) {
    for (index, entry) in shell.history().last(limit) {
        let _ = writeln!(out, "{index:>4}  {entry}");
    }
}
