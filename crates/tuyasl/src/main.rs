mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Logs go to stderr; stdout carries command output and host events.
fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local-only commands
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "tuyasl", &mut std::io::stdout());
            Ok(())
        }
        Command::Region(args) => commands::region::handle(&args, &cli.global),
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Commands that talk to the cloud
        Command::Serve => {
            let cfg = commands::load_config(&cli.global)?;
            commands::serve::handle(&cfg).await
        }
        Command::Login => {
            let cfg = commands::load_config(&cli.global)?;
            commands::login::handle(&cfg, &cli.global).await
        }
        Command::Search => {
            let cfg = commands::load_config(&cli.global)?;
            commands::search::handle(&cfg, &cli.global).await
        }
    }
}
