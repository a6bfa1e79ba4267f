//! Shell completion generation
//!
//! # Usage
//!
//! ```bash
//! # Bash - add to ~/.bashrc
//! source <(issue-import --completions bash)
//!
//! # Fish
//! issue-import --completions fish > ~/.config/fish/completions/issue-import.fish
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;
use std::io;

use crate::cli::Cli;

pub fn run(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "issue-import", &mut io::stdout());
    Ok(())
}
