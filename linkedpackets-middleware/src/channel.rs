//! Channel-layer types exchanged between the relay primitive, this
//! middleware and the wrapped application.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Unordered,
    Ordered,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Counterparty {
    pub port_id: String,
    pub channel_id: String,
}

impl Counterparty {
    pub fn new(port_id: &str, channel_id: &str) -> Self {
        Self {
            port_id: port_id.to_string(),
            channel_id: channel_id.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Height {
    pub revision_number: u64,
    pub revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Self {
        Self { revision_number, revision_height }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Packet {
    pub sequence: u64,
    pub source_port: String,
    pub source_channel: String,
    pub destination_port: String,
    pub destination_channel: String,
    pub data: Vec<u8>,
    pub timeout_height: Height,
    pub timeout_timestamp: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Acknowledgement {
    Result(Vec<u8>),
    Error(String),
}

impl Acknowledgement {
    pub fn success(&self) -> bool {
        matches!(self, Acknowledgement::Result(_))
    }
}
