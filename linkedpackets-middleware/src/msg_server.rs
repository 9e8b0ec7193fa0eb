use log::info;
use serde::{Deserialize, Serialize};

use linkedpackets_utils::address::parse_address;

use crate::{Error, Keeper, LinkSession, Params, Result};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MsgStartLink {
    pub sender: String,
    pub link_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MsgStopLink {
    pub sender: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MsgUpdateParams {
    pub authority: String,
    #[serde(default)]
    pub params: Params,
}

/// Handles the module's transaction messages.
#[derive(Clone, Debug)]
pub struct MsgServer {
    keeper: Keeper,
}

impl MsgServer {
    pub fn new(keeper: Keeper) -> Self {
        Self { keeper }
    }

    /// Opens a link session. Fails while another session is active.
    pub async fn start_link(&self, msg: &MsgStartLink) -> Result<()> {
        validate_address("sender", &msg.sender)?;
        let session = self.keeper.link_session().await?.start(&msg.link_id)?;
        self.keeper.set_link_session(&session).await?;
        info!("link {} started by {}", msg.link_id, msg.sender);
        Ok(())
    }

    /// Closes the link session. Stopping an idle session is a no-op.
    pub async fn stop_link(&self, msg: &MsgStopLink) -> Result<()> {
        validate_address("sender", &msg.sender)?;
        self.keeper.set_link_session(&LinkSession::Idle).await?;
        info!("link session stopped by {}", msg.sender);
        Ok(())
    }

    pub async fn update_params(&self, msg: &MsgUpdateParams) -> Result<()> {
        validate_address("authority", &msg.authority)?;
        if msg.authority != self.keeper.authority() {
            return Err(Error::Unauthorized {
                got: msg.authority.clone(),
                want: self.keeper.authority().to_string(),
            });
        }
        msg.params.validate()?;
        self.keeper.set_params(&msg.params).await?;
        info!("params updated by {}", msg.authority);
        Ok(())
    }
}

fn validate_address(role: &'static str, address: &str) -> Result<()> {
    parse_address(address).map_err(|source| Error::InvalidAddress { role, source })?;
    Ok(())
}
