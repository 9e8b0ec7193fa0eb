use serde::{Deserialize, Serialize};

use linkedpackets_datastore::models::LinkEnabled;

use crate::{Keeper, LinkSession, PacketIdentifier, Params, Result};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkSessionResponse {
    pub linking: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_packet: Option<PacketIdentifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_index: Option<u64>,
}

impl From<LinkSession> for LinkSessionResponse {
    fn from(session: LinkSession) -> Self {
        match session {
            LinkSession::Idle => Self {
                linking: false,
                link_id: None,
                prev_packet: None,
                next_index: None,
            },
            LinkSession::Linking(active) => Self {
                linking: true,
                link_id: Some(active.link_id),
                prev_packet: active.prev_packet,
                next_index: Some(active.next_index),
            },
        }
    }
}

/// Read-only view of the module state.
#[derive(Clone, Debug)]
pub struct QueryServer {
    keeper: Keeper,
}

impl QueryServer {
    pub fn new(keeper: Keeper) -> Self {
        Self { keeper }
    }

    pub async fn params(&self) -> Result<Params> {
        self.keeper.params().await
    }

    pub async fn link_enabled(&self, port_id: &str, channel_id: &str) -> Result<bool> {
        self.keeper.is_link_enabled(port_id, channel_id).await
    }

    pub async fn link_enabled_channels(&self) -> Result<Vec<LinkEnabled>> {
        self.keeper.link_enabled_channels().await
    }

    pub async fn link_session(&self) -> Result<LinkSessionResponse> {
        Ok(self.keeper.link_session().await?.into())
    }
}
