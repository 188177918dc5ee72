mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use resin_core::Resin;

use crate::cli::{Cli, Command, DevicesCommand};
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
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local-only commands
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "resin", &mut std::io::stdout());
            Ok(())
        }

        Command::Devices(ref args) if matches!(args.command, DevicesCommand::Uuid) => {
            output::print_output(&resin_core::generate_uuid(), cli.global.quiet);
            Ok(())
        }

        // Everything else talks to the API
        cmd => {
            let require_token = matches!(cmd, Command::Apps(_) | Command::Devices(_));
            let client_config = config::build_client_config(&cli.global, require_token)?;
            let resin = Resin::new(client_config)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &resin, &cli.global).await
        }
    }
}
