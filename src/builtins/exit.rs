//! `exit` — terminate the shell process with status 0. Arguments are
//! ignored entirely, per the spec's fixed builtin set.

use super::BuiltinOutcome;

pub fn run(_args: &[String]) -> BuiltinOutcome {
    BuiltinOutcome::Exit(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_argument_exits_zero() {
        assert_eq!(run(&[]), BuiltinOutcome::Exit(0));
    }

    #[test]
    fn numeric_argument_is_ignored() {
        assert_eq!(run(&["42".to_string()]), BuiltinOutcome::Exit(0));
    }

    #[test]
    fn non_numeric_argument_is_also_ignored() {
        assert_eq!(run(&["banana".to_string()]), BuiltinOutcome::Exit(0));
    }
}
