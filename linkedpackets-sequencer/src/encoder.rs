use anyhow::Result;

use crate::tx::Tx;

pub trait TxEncoder: Send + Sync {
    fn encode(&self, tx: &Tx) -> Result<Vec<u8>>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonTxEncoder;

impl TxEncoder for JsonTxEncoder {
    fn encode(&self, tx: &Tx) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(tx)?)
    }
}
