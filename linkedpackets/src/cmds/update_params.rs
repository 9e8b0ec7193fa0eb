use anyhow::{Context, Result};
use clap::Parser;

use linkedpackets_middleware::msg_server::{MsgServer, MsgUpdateParams};
use linkedpackets_middleware::Params;

use super::ConfigOpts;

#[derive(Debug, Parser)]
#[command(about = "Replace the module params; must be signed by the module authority")]
pub struct Opts {
    #[command(flatten)]
    config: ConfigOpts,

    #[clap(long)]
    authority: String,

    /// Params as JSON.
    #[clap(long, default_value = "{}")]
    params: String,
}

pub async fn run(opts: &Opts) -> Result<()> {
    let params: Params = serde_json::from_str(&opts.params).context("Failed to parse params")?;
    let keeper = opts.config.open_keeper()?;
    let msg = MsgUpdateParams {
        authority: opts.authority.clone(),
        params,
    };
    MsgServer::new(keeper).update_params(&msg).await?;
    Ok(())
}
