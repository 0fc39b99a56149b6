use crate::opts::{Command, ReplayOpts};
use crate::prelude::*;

mod analyzer;
mod clash_royale;
mod opts;
mod prelude;
mod replay;
mod tracing;
mod web;

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    let opts = opts::parse();
    let _sentry_guard = crate::tracing::init(opts.sentry_dsn, opts.traces_sample_rate)?;

    let start_instant = Instant::now();
    let result = match opts.subcommand {
        Command::Web(opts) => web::run(&opts).await,
        Command::Replay(opts) => run_replay(&opts).await,
    };
    info!(elapsed = %crate::tracing::format_elapsed(start_instant), "finished");
    result
}

/// Submits the player tag once and prints the display container.
async fn run_replay(opts: &ReplayOpts) -> Result {
    let handler = replay::FormHandler::initialize(&opts.base_url)?;
    handler.on_submit(&opts.player_tag).await;
    println!("{}", handler.container().contents().await);
    Ok(())
}
