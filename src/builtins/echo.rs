//! `echo` — write its arguments, space-separated, followed by a newline.
//! No flag handling (`-n`, `-e`) — out of scope per the data model, which
//! only expands `echo`'s argv into its literal text.

use std::io::Write;

pub fn run(args: &[String], out: &mut impl Write) -> i32 {
    let line = args.join(" ");
    if writeln!(out, "{line}").is_err() {
        return 1;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_args_with_single_spaces() {
        let mut buf = Vec::new();
        let code = run(&["hello".into(), "world".into()], &mut buf);
        assert_eq!(code, 0);
        assert_eq!(buf, b"hello world\n");
    }

    #[test]
    fn no_args_prints_a_bare_newline() {
        let mut buf = Vec::new();
        run(&[], &mut buf);
        assert_eq!(buf, b"\n");
    }
}
