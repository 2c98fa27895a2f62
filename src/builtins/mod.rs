//! Built-in commands
//!
//! A small, fixed dispatch table rather than the teacher's trait-object
//! `CommandRegistry` — there are six built-ins, none of them pluggable, so a
//! match arm per name (as the teacher's own `builtin_dispatch.rs` stub
//! already sketches) is the right amount of machinery.

mod cd;
mod echo;
mod exit;
mod history_cmd;
mod pwd;
mod type_cmd;

use std::io::{Read, Write};

use crate::shell::ShellState;

/// What running a built-in produced: either a normal exit code to hand back
/// to the pipeline executor, or a request to terminate the whole shell
/// process (`exit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    Code(i32),
    Exit(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Exit,
    Echo,
    Pwd,
    Cd,
    Type,
    History,
}

/// Is `name` one of the shell's built-ins? Used by the parser/executor to
/// decide whether a stage runs in-process or is handed to the OS.
pub fn lookup(name: &str) -> Option<()> {
    builtin_for(name).map(|_| ())
}

/// Names recognized by `type` as "a shell builtin", independent of dispatch.
pub fn is_builtin_name(name: &str) -> bool {
    builtin_for(name).is_some()
}

fn builtin_for(name: &str) -> Option<Builtin> {
    match name {
        "exit" => Some(Builtin::Exit),
        "echo" => Some(Builtin::Echo),
        "pwd" => Some(Builtin::Pwd),
        "cd" => Some(Builtin::Cd),
        "type" => Some(Builtin::Type),
        "history" => Some(Builtin::History),
        _ => None,
    }
}

/// Run a built-in as the pipeline's final (or only) stage, in-process, with
/// real stdout/stderr (already redirected by `IoRedirectScope` if the stage
/// named a target) and full access to mutate shell state.
pub fn dispatch(argv: &[String], shell: &mut ShellState) -> BuiltinOutcome {
    run_with(
        argv,
        shell,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
}

/// Run a built-in as a non-final pipeline stage, on a helper thread, writing
/// to the pipe that feeds the next stage instead of the shell's real
/// stdout, and to `err` instead of the shell's real stderr (the stage's own
/// fd-2 redirect target, opened by the caller, or the real stderr if it
/// named none — the same split `apply_stderr_redirect` makes for external
/// commands). `reader` is accepted for signature symmetry with a process
/// stage's stdin; none of these built-ins consume it.
///
/// `shell` here is a throwaway state seeded from the real session's cwd and
/// history (per POSIX subshell semantics, a non-final `cd`/`history`
/// mutates only this copy and never reaches the parent shell) but it must
/// start from the *real* history, not an empty one, so `history -w`/`-a`
/// here still flush the session's actual entries.
pub fn dispatch_with_io(
    argv: &[String],
    shell: &mut ShellState,
    reader: &mut impl Read,
    writer: &mut impl Write,
    err: &mut impl Write,
) -> BuiltinOutcome {
    let _ = reader;
    run_with(argv, shell, writer, err)
}

fn run_with(
    argv: &[String],
    shell: &mut ShellState,
    out: &mut impl Write,
    err: &mut impl Write,
) -> BuiltinOutcome {
    let args = &argv[1..];
    match builtin_for(&argv[0]).expect("dispatch called on a non-builtin") {
        Builtin::Exit => exit::run(args),
        Builtin::Echo => BuiltinOutcome::Code(echo::run(args, out)),
        Builtin::Pwd => BuiltinOutcome::Code(pwd::run(shell.cwd(), out)),
        Builtin::Cd => BuiltinOutcome::Code(cd::run(args, shell, out)),
        Builtin::Type => BuiltinOutcome::Code(type_cmd::run(args, out)),
        Builtin::History => BuiltinOutcome::Code(history_cmd::run(args, shell, out, err)),
    }
}
