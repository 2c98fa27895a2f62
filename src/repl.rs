//! REPL driver
//!
//! Prompt, read, lex, parse, execute, repeat. `HISTFILE` is loaded once at
//! startup and flushed once at shutdown — the single-writer policy recorded
//! in the design notes, chosen over having every `-a`-style incremental
//! write race a concurrent reader of the same file.

use std::io::{self, BufRead, Write};

use crate::errors::{LexError, ParseError};
use crate::lexer;
use crate::parser::parse_pipeline;
use crate::pipeline_exec;
use crate::shell::ShellState;

const PROMPT: &str = "$ ";

pub struct Repl<R, W> {
    input: R,
    output: W,
    shell: ShellState,
    histfile: Option<std::path::PathBuf>,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W, shell: ShellState) -> Self {
        let histfile = std::env::var_os("HISTFILE").map(std::path::PathBuf::from);
        let mut repl = Self {
            input,
            output,
            shell,
            histfile,
        };
        if let Some(path) = repl.histfile.clone() {
            repl.shell.history_mut().load_startup_file(&path);
        }
        repl
    }

    /// Run the read-eval-print loop until EOF, then flush history and
    /// return the exit code for the process (0 unless `exit` ran earlier in
    /// the same call and somehow returned, which `std::process::exit`
    /// prevents — this path only fires on a plain EOF).
    pub fn run(&mut self) -> io::Result<i32> {
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            let bytes_read = self.input.read_line(&mut line)?;
            if bytes_read == 0 {
                break;
            }

            let line = line.trim_end_matches('\n');
            if line.trim().is_empty() {
                continue;
            }

            self.shell.history_mut().append(line);
            self.eval(line)?;
        }

        self.flush_history();
        Ok(0)
    }

    fn eval(&mut self, line: &str) -> io::Result<()> {
        let tokens = match lexer::lex(line) {
            Ok(tokens) => tokens,
            Err(LexError::UnbalancedQuotes) => {
                eprintln!("{}", LexError::UnbalancedQuotes);
                return Ok(());
            }
        };

        let pipeline = match parse_pipeline(&tokens) {
            Ok(Some(pipeline)) => pipeline,
            Ok(None) => return Ok(()),
            Err(ParseError::MissingRedirectionTarget) => {
                eprintln!("{}", ParseError::MissingRedirectionTarget);
                return Ok(());
            }
        };

        pipeline_exec::run(&pipeline, &mut self.shell)?;
        Ok(())
    }

    fn flush_history(&mut self) {
        if let Some(path) = self.histfile.clone() {
            let _ = self.shell.history_mut().write_file(&path);
        }
    }
}
