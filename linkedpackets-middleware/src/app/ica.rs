use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Upper bound on an interchain account packet memo.
pub const MAX_MEMO_CHARS: usize = 32768;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PacketType {
    #[default]
    #[serde(rename = "TYPE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "TYPE_EXECUTE_TX")]
    ExecuteTx,
}

/// Interchain account payload: a batch of encoded messages for the host
/// chain to execute on behalf of the controller.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InterchainAccountPacketData {
    #[serde(rename = "type")]
    pub packet_type: PacketType,
    #[serde(serialize_with = "encode_base64", deserialize_with = "decode_base64")]
    pub data: Vec<u8>,
    #[serde(default)]
    pub memo: String,
}

fn encode_base64<S: Serializer>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&general_purpose::STANDARD.encode(data))
}

fn decode_base64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    general_purpose::STANDARD
        .decode(encoded)
        .map_err(serde::de::Error::custom)
}

impl InterchainAccountPacketData {
    pub fn execute_tx(data: Vec<u8>, memo: &str) -> Self {
        Self {
            packet_type: PacketType::ExecuteTx,
            data,
            memo: memo.to_string(),
        }
    }

    pub fn validate_basic(&self) -> Result<()> {
        if self.packet_type == PacketType::Unspecified {
            return Err(anyhow!("packet data type cannot be unspecified"));
        }
        if self.data.is_empty() {
            return Err(anyhow!("packet data cannot be empty"));
        }
        if self.memo.chars().count() > MAX_MEMO_CHARS {
            return Err(anyhow!(
                "packet data memo cannot be greater than {} characters",
                MAX_MEMO_CHARS
            ));
        }
        Ok(())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let data: Self = serde_json::from_slice(bytes)?;
        data.validate_basic()?;
        Ok(data)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
