use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use linkedpackets_middleware::query_server::QueryServer;

use super::ConfigOpts;

#[derive(Debug, Parser)]
#[command(about = "Read module state")]
pub struct Opts {
    #[command(flatten)]
    config: ConfigOpts,

    #[command(subcommand)]
    query: Query,
}

#[derive(Debug, Subcommand)]
enum Query {
    Params,

    /// Whether a channel negotiated linked packets.
    #[command(alias = "link_enabled")]
    LinkEnabled {
        #[clap(long)]
        port_id: String,
        #[clap(long)]
        channel_id: String,
    },

    Session,

    /// Every link-enabled channel.
    Channels,
}

pub async fn run(opts: &Opts) -> Result<()> {
    let server = QueryServer::new(opts.config.open_keeper_readonly()?);
    match &opts.query {
        Query::Params => print_json(&server.params().await?),
        Query::LinkEnabled { port_id, channel_id } => {
            print_json(&server.link_enabled(port_id, channel_id).await?)
        }
        Query::Session => print_json(&server.link_session().await?),
        Query::Channels => print_json(&server.link_enabled_channels().await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
