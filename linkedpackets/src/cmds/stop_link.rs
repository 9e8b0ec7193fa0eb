use anyhow::Result;
use clap::Parser;

use linkedpackets_middleware::msg_server::{MsgServer, MsgStopLink};

use super::ConfigOpts;

#[derive(Debug, Parser)]
#[command(about = "Stop the current link session")]
pub struct Opts {
    #[command(flatten)]
    config: ConfigOpts,

    #[clap(long)]
    sender: String,
}

pub async fn run(opts: &Opts) -> Result<()> {
    let keeper = opts.config.open_keeper()?;
    let msg = MsgStopLink {
        sender: opts.sender.clone(),
    };
    MsgServer::new(keeper).stop_link(&msg).await?;
    Ok(())
}
