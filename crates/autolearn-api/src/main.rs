//! AutoLearn CLI entry point.
//!
//! Binary name: `autolearn`
//!
//! Parses CLI arguments, initializes tracing and the skill engine, then
//! dispatches to the appropriate command handler.

mod cli;
mod demo;
mod response;
mod state;

use clap::Parser;
use clap_complete::generate;

use autolearn_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "autolearn", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.config.as_deref()).await?;

    let outcome = match &cli.command {
        Commands::List => cli::skill::handle_list(&state, cli.json).map(|()| true),
        Commands::Inspect { name } => cli::skill::handle_inspect(name, &state, cli.json).map(|()| true),
        Commands::Run {
            name,
            args,
            max_depth,
        } => cli::skill::handle_run(name, args, *max_depth, &state, cli.json),
        Commands::Completions { .. } => Ok(true),
    };

    shutdown_tracing();

    if !outcome? {
        std::process::exit(1);
    }
    Ok(())
}
