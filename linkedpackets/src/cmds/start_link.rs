use anyhow::Result;
use clap::Parser;

use linkedpackets_middleware::msg_server::{MsgServer, MsgStartLink};

use super::ConfigOpts;

#[derive(Debug, Parser)]
#[command(about = "Start a link session; following packets on linked channels are chained")]
pub struct Opts {
    #[command(flatten)]
    config: ConfigOpts,

    #[clap(long)]
    sender: String,

    /// Generated when omitted.
    #[clap(long)]
    link_id: Option<String>,
}

pub async fn run(opts: &Opts) -> Result<()> {
    let keeper = opts.config.open_keeper()?;
    let link_id = opts
        .link_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let msg = MsgStartLink {
        sender: opts.sender.clone(),
        link_id: link_id.clone(),
    };
    MsgServer::new(keeper).start_link(&msg).await?;

    println!("{}", link_id);
    Ok(())
}
