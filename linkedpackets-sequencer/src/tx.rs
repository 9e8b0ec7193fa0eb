use serde::{Deserialize, Serialize};

use linkedpackets_middleware::channel::{Height, Packet};

/// Receipt of a packet relayed from a counterparty chain.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MsgRecvPacket {
    pub packet: Packet,
    #[serde(default)]
    pub proof_height: Height,
    pub signer: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Msg {
    RecvPacket(MsgRecvPacket),
    /// Any message the sequencer does not look into.
    Other {
        type_url: String,
        #[serde(default)]
        value: serde_json::Value,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Tx {
    pub msgs: Vec<Msg>,
    #[serde(default)]
    pub memo: String,
}

impl Tx {
    pub fn new(msgs: Vec<Msg>) -> Self {
        Self { msgs, memo: String::new() }
    }

    pub fn with_memo(mut self, memo: &str) -> Self {
        self.memo = memo.to_string();
        self
    }
}
