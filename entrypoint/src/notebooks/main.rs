use std::{process::ExitCode, time::Instant};

use clap::Parser;
use common::utils::{error_chain, format_elapsed};
use mimalloc::MiMalloc;
use tokio::task::spawn_blocking;
use tracing::{error, info, warn};
use utils::logger::configure_logger;

use crate::{
    cli::{Cli, Command},
    errors::AppError,
};

mod cli;
mod errors;
mod phases;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    configure_logger();

    let cli = Cli::parse();
    let started = Instant::now();

    let result = run(cli).await;

    info!("Finished in {}", format_elapsed(started.elapsed()));

    match spawn_blocking(metrics::shutdown).await {
        Ok(Err(err)) => warn!("Failed to flush metrics: {err}"),
        Err(err) => warn!("Failed to flush metrics: {err}"),
        Ok(Ok(())) => {}
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", error_chain(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let kind = cli.session.session;

    match &cli.command {
        Command::Discover(args) => {
            let mut session = phases::open_session(&cli.session).await?;

            phases::discover(session.as_mut(), kind, args, &cli.urls_file).await?;
        }
        Command::Collect(args) => {
            let urls = phases::load_urls(&cli.urls_file)?;
            let mut session = phases::open_session(&cli.session).await?;

            phases::collect(session.as_mut(), args, &urls).await?;
        }
        Command::Run { discover, collect } => {
            let mut session = phases::open_session(&cli.session).await?;

            let urls = phases::discover(session.as_mut(), kind, discover, &cli.urls_file).await?;
            phases::collect(session.as_mut(), collect, &urls).await?;
        }
    }

    Ok(())
}
