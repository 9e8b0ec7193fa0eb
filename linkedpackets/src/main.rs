mod cmds;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "linkedpackets")]
#[command(version)]
#[command(about = "Linked packets module CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(alias = "create_id")]
    CreateId(cmds::create_id::Opts),

    #[command(alias = "start_link")]
    StartLink(cmds::start_link::Opts),

    #[command(alias = "stop_link")]
    StopLink(cmds::stop_link::Opts),

    #[command(alias = "update_params")]
    UpdateParams(cmds::update_params::Opts),

    Query(cmds::query::Opts),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::CreateId(opts) => cmds::create_id::run(opts).await?,
        Commands::StartLink(opts) => cmds::start_link::run(opts).await?,
        Commands::StopLink(opts) => cmds::stop_link::run(opts).await?,
        Commands::UpdateParams(opts) => cmds::update_params::run(opts).await?,
        Commands::Query(opts) => cmds::query::run(opts).await?,
    }

    Ok(())
}
