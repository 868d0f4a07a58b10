//! Herald CLI entry point.
//!
//! Binary name: `herald`
//!
//! Parses CLI arguments, sets up tracing, and runs the release pipeline.
//! Exits 0 when the release was created and summarized (even if the
//! update or chat step failed), 1 otherwise.

mod cli;
mod run;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "herald", &mut std::io::stdout());
        return Ok(());
    }

    let filter = herald_observe::tracing_setup::filter_for_verbosity(cli.verbose, cli.quiet);
    herald_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run::run(&cli).await;
    herald_observe::tracing_setup::shutdown_tracing();
    result
}
