mod cli;
mod commands;
mod output;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, UserCommands};
use redmine_cli::config::Config;
use redmine_cli::{RedmineClient, Result, UserStatus};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    init_tracing(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise `--verbose` shows the
/// client's request/response events.
fn init_tracing(verbose: bool) {
    let default = if verbose { "redmine_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "redmine", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run()?;
        }
        Commands::Users { action } => {
            let config = Config::load()?;
            let client = RedmineClient::new(&config.url()?, config.api_key()?)?;

            match action {
                UserCommands::List(args) => {
                    commands::users::list(&client, args).await?;
                }
                UserCommands::Show { id, include } => {
                    commands::users::show(&client, id, include).await?;
                }
                UserCommands::Count => {
                    commands::users::count(&client).await?;
                }
                UserCommands::SetStatus { id, status } => {
                    commands::users::set_status(&client, id, status).await?;
                }
                UserCommands::Lock { id } => {
                    commands::users::set_status(&client, id, UserStatus::Locked).await?;
                }
                UserCommands::Unlock { id } => {
                    commands::users::set_status(&client, id, UserStatus::Active).await?;
                }
            }
        }
    }

    Ok(())
}
