use std::future::Future;
use std::process::ExitCode;

use clap::Parser;
use tokio::signal;

mod cli;
mod commands;
mod controller;
mod logging;
mod profile;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Command};
use self::commands::QueryOptions;
use self::controller::AppController;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = profile::load_config(cli.config.as_deref())?;
    profile::apply_overrides(&mut config, &cli);

    logging::init(config.log_json);

    let controller = AppController::new(config)?;
    controller.startup_self_test().await;

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    run(&controller, cli.command, shutdown).await
}

pub async fn run(
    controller: &AppController,
    command: Command,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<ExitCode> {
    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            Ok(ExitCode::from(130))
        }
        result = dispatch(controller, command) => result,
    }
}

async fn dispatch(controller: &AppController, command: Command) -> anyhow::Result<ExitCode> {
    let core = controller.core();
    let mut out = std::io::stdout();

    match command {
        Command::Query {
            dictionaries,
            query,
            diagnostics,
            compact,
        } => {
            let options = QueryOptions {
                diagnostics,
                compact,
            };
            commands::handle_query(core, &dictionaries, &query.join(" "), options, &mut out).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::SelfTest { engine } => {
            let passed = commands::handle_self_test(core, engine.as_deref(), &mut out).await?;
            Ok(if passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Engines => {
            commands::handle_engines(core, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
