use serde::{Deserialize, Serialize};

use crate::{PacketIdentifier, Result};

/// Link metadata written into a packet memo.
///
/// Key order of the encoded form is fixed: `link_id`, `prev_packet`,
/// `last_packet`, `initial_packet`, `link_index`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkData {
    pub link_id: String,
    #[serde(default)]
    pub prev_packet: PacketIdentifier,
    #[serde(rename = "last_packet", default)]
    pub is_last_packet: bool,
    #[serde(rename = "initial_packet", default)]
    pub is_initial_packet: bool,
    /// Zero-based position within the link, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_index: Option<String>,
}

impl LinkData {
    pub fn new(link_id: &str, prev_packet: PacketIdentifier, is_last_packet: bool, link_index: u64) -> Self {
        Self {
            link_id: link_id.to_string(),
            is_initial_packet: prev_packet.is_sentinel(),
            prev_packet,
            is_last_packet,
            link_index: Some(link_index.to_string()),
        }
    }

    pub fn from_memo(memo: &str) -> Result<Self> {
        Ok(serde_json::from_str(memo)?)
    }

    pub fn to_memo(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// `None` when the index is absent or not a non-negative integer.
    pub fn index(&self) -> Option<u64> {
        self.link_index.as_deref().and_then(|index| index.parse().ok())
    }
}
