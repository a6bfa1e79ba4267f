//! CLI argument definitions using clap derive

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "issue-import")]
#[command(author, version, about = "Bulk-import work items from a CSV file into GitHub issues")]
#[command(long_about = "Bulk-import work items from a CSV file into GitHub issues.\n\n\
Creates one issue per row, then links them: dependency checklists, parent references, \
and subtask lists on parent issues.\n\n\
Requires GITHUB_REPOSITORY (<owner>/<name>) and GITHUB_TOKEN in the environment.")]
pub struct Cli {
    /// CSV file to import
    #[arg(long, value_name = "PATH", required_unless_present_any = ["template", "completions"])]
    pub csv: Option<PathBuf>,

    /// Milestone to attach every issue to (created if missing)
    #[arg(long, value_name = "NAME", required_unless_present_any = ["template", "completions"])]
    pub milestone: Option<String>,

    /// GitHub username to assign every created issue to
    #[arg(long, value_name = "USER")]
    pub assignee: Option<String>,

    /// Print what would be created without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Print a CSV template (header and example rows) and exit
    #[arg(long, conflicts_with_all = ["csv", "completions"])]
    pub template: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL", conflicts_with = "csv")]
    pub completions: Option<Shell>,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress per-row progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Print every API request
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
