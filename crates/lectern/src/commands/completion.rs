use clap::CommandFactory;
use std::io;

use crate::cli::Cli;

pub fn run(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}
