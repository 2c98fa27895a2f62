//! `pwd` — print the shell's tracked current working directory.
//!
//! Prints `ShellState`'s own notion of cwd, not a fresh `getcwd(3)` call —
//! the two only disagree if the directory was removed out from under the
//! process, which this shell doesn't need to detect.

use std::io::Write;
use std::path::Path;

pub fn run(cwd: &Path, out: &mut impl Write) -> i32 {
    if writeln!(out, "{}", cwd.display()).is_err() {
        return 1;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_the_given_directory() {
        let mut buf = Vec::new();
        run(Path::new("/tmp"), &mut buf);
        assert_eq!(buf, b"/tmp\n");
    }
}
