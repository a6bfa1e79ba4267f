//! `issue-import` command - create GitHub issues from a CSV file

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::helpers::csv_line;
use crate::cli::Cli;
use crate::core::row::COLUMNS;
use crate::core::{load_rows, Config, GitHubClient, ImportOptions, ImportStats, Importer};

/// Example rows for `--template`: an epic with two subtasks, one blocked on the other
const TEMPLATE_ROWS: [[&str; 9]; 3] = [
    [
        "E1",
        "User accounts",
        "feature",
        "P1",
        "8",
        "",
        "Sign-up, login and profile pages",
        "",
        "backend,frontend",
    ],
    [
        "E1.1",
        "Account schema",
        "task",
        "P1",
        "3",
        "E1",
        "Tables and migrations for users",
        "",
        "backend",
    ],
    [
        "E1.2",
        "Login form",
        "task",
        "P2",
        "2",
        "E1",
        "Form, validation and error states",
        "E1.1",
        "frontend",
    ],
];

/// Print a CSV template to stdout
pub fn generate_template() -> Result<()> {
    println!("{}", csv_line(&COLUMNS));
    for row in &TEMPLATE_ROWS {
        println!("{}", csv_line(row));
    }

    // Print usage hint to stderr so it doesn't interfere with redirected output
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: issue-import --template > issues.csv",
        style("→").blue()
    );

    Ok(())
}

pub fn run(cli: &Cli) -> Result<()> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    let csv_path = cli
        .csv
        .clone()
        .ok_or_else(|| {
            miette::miette!("CSV file required. Usage: issue-import --csv items.csv --milestone NAME")
        })?;
    let milestone = cli.milestone.clone().unwrap_or_default();

    let rows = load_rows(&csv_path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load {}", csv_path.display()))?;

    println!(
        "{} Loaded {} rows from {}{}",
        style("→").blue(),
        style(rows.len()).cyan(),
        style(csv_path.display()).yellow(),
        if cli.dry_run {
            style(" (dry run)").dim().to_string()
        } else {
            String::new()
        }
    );
    println!();

    let options = ImportOptions {
        milestone,
        assignee: cli
            .assignee
            .clone()
            .or_else(|| config.assignee.clone())
            .filter(|a| !a.is_empty()),
        label_color: config.label_color.clone(),
        dry_run: cli.dry_run,
        quiet: cli.global.quiet,
    };

    let client = GitHubClient::new(&config).with_verbose(cli.global.verbose);
    let outcome = Importer::new(&client, &rows, &options)
        .run()
        .into_diagnostic()
        .wrap_err(format!("Import into {} aborted", config.repo))?;

    print_summary(&outcome.stats, cli.dry_run);

    if cli.global.verbose {
        eprintln!("  {} API request(s)", client.request_count());
    }

    Ok(())
}

fn print_summary(stats: &ImportStats, dry_run: bool) {
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Rows processed:    {}", style(stats.rows_processed).cyan());
    println!("  Issues created:    {}", style(stats.items_created).green());
    if stats.labels_created > 0 {
        println!("  Labels created:    {}", style(stats.labels_created).green());
    }
    if stats.label_failures > 0 {
        println!("  Label failures:    {}", style(stats.label_failures).red());
    }
    if stats.items_linked > 0 {
        println!("  Issues linked:     {}", style(stats.items_linked).yellow());
    }
    if stats.parents_annotated > 0 {
        println!("  Parents updated:   {}", style(stats.parents_annotated).yellow());
    }

    if dry_run {
        println!();
        println!(
            "{}",
            style("Dry run complete. Nothing was sent to GitHub.").yellow()
        );
    }
}
