mod cli;
mod config;
mod run;
mod watch;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    harvest_logging::initialize(args.log_destination(), args.log_level());

    run::run(args).await
}
