use clap::Parser;
use miette::Result;
use issue_import::cli::commands::{completions, import};
use issue_import::cli::Cli;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        return completions::run(shell);
    }
    if cli.template {
        return import::generate_template();
    }

    import::run(&cli)
}
