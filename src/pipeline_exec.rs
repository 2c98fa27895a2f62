//! Pipeline executor
//!
//! Wires a parsed `Pipeline` to real OS processes and real pipes. Connects
//! `len(stages) - 1` pipes between consecutive stages, spawns external
//! commands with `std::process::Command`, and runs built-ins either
//! in-process (the pipeline's final stage, so it can mutate shell state) or
//! on a helper OS thread (any earlier stage, so an unbuffered write to a
//! full pipe can't deadlock the shell itself) — the same split
//! `other_examples/jswans33-james-shell`'s executor makes between
//! `run_builtin` called directly and spawned work.
//!
//! A stage whose command name doesn't resolve tears the whole pipeline down
//! immediately rather than leaving already-spawned stages blocked reading
//! from a writer that will never come (see the design note this decision is
//! recorded under). An *empty* stage — one with no argv at all, reachable
//! when a pipeline segment is nothing but a redirection operator — is a
//! different, narrower case: it is silently skipped and the rest of the
//! pipeline still launches.

use std::io::{self, Write};
use std::process::{Child, Command, Stdio};
use std::thread;

use crate::builtins::{self, BuiltinOutcome};
use crate::errors::{ResolveError, SpawnError};
use crate::parser::{Pipeline, RedirectMode, Stage};
use crate::path;
use crate::shell::ShellState;

/// Either end of a stage's input: nothing (inherit the terminal), or the
/// read end of the pipe the previous stage writes into.
enum Upstream {
    None,
    Pipe(os_pipe::PipeReader),
}

impl Upstream {
    fn into_stdio(self) -> Option<Stdio> {
        match self {
            Upstream::None => None,
            Upstream::Pipe(r) => Some(Stdio::from(r)),
        }
    }

    fn into_reader(self) -> Option<os_pipe::PipeReader> {
        match self {
            Upstream::None => None,
            Upstream::Pipe(r) => Some(r),
        }
    }
}

enum Launched {
    External(Child),
    /// A built-in that ran synchronously (final stage, in-process) and
    /// already produced its exit code.
    Builtin(i32),
    /// A non-final built-in, executing on a helper thread; join it to learn
    /// its exit code after every process stage has been waited on.
    BuiltinThread(thread::JoinHandle<i32>),
}

/// Run one pipeline to completion and return the exit code of its last
/// stage (pipefail is out of scope; only the last stage's status counts).
pub fn run(pipeline: &Pipeline, shell: &mut ShellState) -> io::Result<i32> {
    let stages = &pipeline.stages;
    if stages.is_empty() {
        return Ok(0);
    }

    if stages.len() == 1 && is_builtin(&stages[0]) {
        return Ok(run_builtin_in_process(&stages[0], shell));
    }

    let mut launched: Vec<Launched> = Vec::with_capacity(stages.len());
    let mut upstream = Upstream::None;

    for (i, stage) in stages.iter().enumerate() {
        let is_last = i == stages.len() - 1;

        if stage.is_empty() {
            // Drop our end of the upstream pipe (its writer sees a broken
            // pipe) and treat whatever comes next as if it opened the
            // pipeline — this stage contributed nothing, but the rest of
            // the pipeline still runs.
            upstream = Upstream::None;
            continue;
        }

        let (reader_for_next, writer_for_this) = if is_last {
            (None, None)
        } else {
            let (reader, writer) = os_pipe::pipe()?;
            (Some(reader), Some(writer))
        };

        if is_builtin(stage) {
            if is_last {
                let code = run_builtin_in_process(stage, shell);
                launched.push(Launched::Builtin(code));
            } else {
                let argv = stage.argv.clone();
                let mut scratch = ShellState::with_history(
                    shell.cwd().to_path_buf(),
                    shell.history().clone(),
                );
                let mut err_out = open_stage_stderr(stage)?;
                let mut reader_in = upstream.into_reader();
                let mut writer_out = writer_for_this.expect("non-last stage always pipes");
                let handle = thread::spawn(move || {
                    let code = match &mut reader_in {
                        Some(r) => {
                            builtins::dispatch_with_io(&argv, &mut scratch, r, &mut writer_out, &mut err_out)
                        }
                        None => builtins::dispatch_with_io(
                            &argv,
                            &mut scratch,
                            &mut io::stdin().lock(),
                            &mut writer_out,
                            &mut err_out,
                        ),
                    };
                    let _ = writer_out.flush();
                    match code {
                        BuiltinOutcome::Code(c) => c,
                        BuiltinOutcome::Exit(c) => c,
                    }
                });
                launched.push(Launched::BuiltinThread(handle));
            }
            upstream = reader_for_next.map(Upstream::Pipe).unwrap_or(Upstream::None);
            continue;
        }

        let program = match path::resolve(&stage.argv[0]) {
            Some(p) => p,
            None if stage.argv[0].contains(std::path::MAIN_SEPARATOR) => {
                std::path::PathBuf::from(&stage.argv[0])
            }
            None => {
                eprintln!("{}", ResolveError { name: stage.argv[0].clone() });
                teardown(launched);
                return Ok(127);
            }
        };

        let mut cmd = Command::new(&program);
        cmd.args(&stage.argv[1..]);
        cmd.current_dir(shell.cwd());
        if let Some(stdin) = upstream.into_stdio() {
            cmd.stdin(stdin);
        }

        if is_last {
            apply_output_redirects(&mut cmd, stage)?;
        } else {
            cmd.stdout(writer_for_this.expect("non-last stage always pipes"));
            apply_stderr_redirect(&mut cmd, stage)?;
        }

        match cmd.spawn() {
            Ok(child) => launched.push(Launched::External(child)),
            Err(e) => {
                let code = if e.kind() == io::ErrorKind::NotFound { 127 } else { 126 };
                eprintln!(
                    "{}",
                    SpawnError { program: stage.argv[0].clone(), source: e }
                );
                teardown(launched);
                return Ok(code);
            }
        }

        upstream = reader_for_next.map(Upstream::Pipe).unwrap_or(Upstream::None);
    }

    let mut last_code = 0;
    for stage in launched {
        last_code = match stage {
            Launched::External(mut child) => child.wait()?.code().unwrap_or(1),
            Launched::Builtin(code) => code,
            Launched::BuiltinThread(handle) => handle.join().unwrap_or(1),
        };
    }

    Ok(last_code)
}

/// Kill and reap every stage already spawned, for pipeline teardown on a
/// mid-pipeline resolve/spawn failure.
fn teardown(launched: Vec<Launched>) {
    for stage in launched {
        match stage {
            Launched::External(mut child) => {
                let _ = child.kill();
                let _ = child.wait();
            }
            Launched::BuiltinThread(handle) => {
                let _ = handle.join();
            }
            Launched::Builtin(_) => {}
        }
    }
}

fn is_builtin(stage: &Stage) -> bool {
    stage
        .argv
        .first()
        .map(|name| builtins::lookup(name).is_some())
        .unwrap_or(false)
}

fn run_builtin_in_process(stage: &Stage, shell: &mut ShellState) -> i32 {
    let scope = match crate::io_scope::IoRedirectScope::apply(stage) {
        Ok(scope) => scope,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };
    let outcome = builtins::dispatch(&stage.argv, shell);
    match outcome {
        BuiltinOutcome::Code(code) => {
            drop(scope);
            code
        }
        BuiltinOutcome::Exit(code) => {
            drop(scope);
            std::process::exit(code);
        }
    }
}

fn apply_output_redirects(cmd: &mut Command, stage: &Stage) -> io::Result<()> {
    if let Some(r) = stage.redirects.get(&1) {
        cmd.stdout(open_for(r)?);
    }
    apply_stderr_redirect(cmd, stage)
}

fn apply_stderr_redirect(cmd: &mut Command, stage: &Stage) -> io::Result<()> {
    if let Some(r) = stage.redirects.get(&2) {
        cmd.stderr(open_for(r)?);
    }
    Ok(())
}

/// The sink a non-final built-in's diagnostics should go to: the stage's own
/// fd-2 redirect target if it named one, the shell's real stderr otherwise —
/// the same choice `apply_stderr_redirect` makes for an external command in
/// the same position.
fn open_stage_stderr(stage: &Stage) -> io::Result<Box<dyn Write + Send>> {
    match stage.redirects.get(&2) {
        Some(r) => Ok(Box::new(open_for(r)?)),
        None => Ok(Box::new(io::stderr())),
    }
}

fn open_for(redirect: &crate::parser::Redirection) -> io::Result<std::fs::File> {
    let mut opts = std::fs::OpenOptions::new();
    opts.write(true).create(true);
    match redirect.mode {
        RedirectMode::Truncate => opts.truncate(true),
        RedirectMode::Append => opts.append(true),
    };
    opts.open(&redirect.target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pipeline;
    use tempfile::tempdir;

    fn toks(s: &[&str]) -> Vec<String> {
        s.iter().map(|t| t.to_string()).collect()
    }

    fn fresh_shell() -> ShellState {
        ShellState::new(std::env::temp_dir())
    }

    #[test]
    fn single_external_command_runs() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let pipeline = parse_pipeline(&toks(&["echo", "hi", ">", out.to_str().unwrap()]))
            .unwrap()
            .unwrap();
        let mut shell = fresh_shell();
        let code = run(&pipeline, &mut shell).unwrap();
        assert_eq!(code, 0);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "hi\n");
    }

    #[test]
    fn two_stage_pipeline_connects_real_pipe() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let pipeline = parse_pipeline(&toks(&[
            "echo", "hello", "|", "tr", "a-z", "A-Z", ">", out.to_str().unwrap(),
        ]))
        .unwrap()
        .unwrap();
        let mut shell = fresh_shell();
        let code = run(&pipeline, &mut shell).unwrap();
        assert_eq!(code, 0);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "HELLO\n");
    }

    #[test]
    fn unresolved_command_exits_127() {
        let pipeline = parse_pipeline(&toks(&["totally-not-a-real-binary-xyz"]))
            .unwrap()
            .unwrap();
        let mut shell = fresh_shell();
        let code = run(&pipeline, &mut shell).unwrap();
        assert_eq!(code, 127);
    }

    #[test]
    fn pwd_as_sole_command_runs_in_process() {
        let pipeline = parse_pipeline(&toks(&["pwd"])).unwrap().unwrap();
        let mut shell = fresh_shell();
        let code = run(&pipeline, &mut shell).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn builtin_as_non_final_stage_runs_on_helper_thread() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let pipeline = parse_pipeline(&toks(&[
            "echo", "hi", "|", "cat", ">", out.to_str().unwrap(),
        ]))
        .unwrap()
        .unwrap();
        let mut shell = fresh_shell();
        let code = run(&pipeline, &mut shell).unwrap();
        assert_eq!(code, 0);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "hi\n");
    }

    #[test]
    fn empty_middle_stage_is_skipped_and_later_stages_still_run() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let redirect_target = dir.path().join("middle");
        let pipeline = parse_pipeline(&toks(&[
            "echo",
            "hi",
            "|",
            ">",
            redirect_target.to_str().unwrap(),
            "|",
            "echo",
            "done",
            ">",
            out.to_str().unwrap(),
        ]))
        .unwrap()
        .unwrap();
        let mut shell = fresh_shell();
        let code = run(&pipeline, &mut shell).unwrap();
        assert_eq!(code, 0);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "done\n");
    }

    #[test]
    fn non_final_builtin_sees_real_session_history() {
        let dir = tempdir().unwrap();
        let hist_path = dir.path().join("hist");
        let mut shell = fresh_shell();
        shell.history_mut().append("echo a");
        shell.history_mut().append("echo b");

        let pipeline = parse_pipeline(&toks(&[
            "history",
            "-w",
            hist_path.to_str().unwrap(),
            "|",
            "cat",
        ]))
        .unwrap()
        .unwrap();
        run(&pipeline, &mut shell).unwrap();

        assert_eq!(
            std::fs::read_to_string(&hist_path).unwrap(),
            "echo a\necho b\n"
        );
    }

    #[test]
    fn non_final_builtin_stderr_honors_fd2_redirect() {
        let dir = tempdir().unwrap();
        let err_path = dir.path().join("err");
        let missing = dir.path().join("missing-hist");
        let pipeline = parse_pipeline(&toks(&[
            "history",
            "-r",
            missing.to_str().unwrap(),
            "2>",
            err_path.to_str().unwrap(),
            "|",
            "cat",
        ]))
        .unwrap()
        .unwrap();
        let mut shell = fresh_shell();
        run(&pipeline, &mut shell).unwrap();

        let content = std::fs::read_to_string(&err_path).unwrap();
        assert!(content.contains("No such file or directory"));
    }
}
