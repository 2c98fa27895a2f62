use std::io::{stdin, stdout, BufReader};

use posh::repl::Repl;
use posh::shell::ShellState;

fn main() {
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("/"));
    let shell = ShellState::new(cwd);
    let mut repl = Repl::new(BufReader::new(stdin()), stdout(), shell);

    let code = repl.run().unwrap_or(1);
    std::process::exit(code);
}
