use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Fungible token transfer payload. Fields are declared in key order so the
/// encoded form is the sorted JSON the transfer application signs over.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FungibleTokenPacketData {
    pub amount: String,
    pub denom: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
    pub receiver: String,
    pub sender: String,
}

impl FungibleTokenPacketData {
    pub fn new(denom: &str, amount: &str, sender: &str, receiver: &str, memo: &str) -> Self {
        Self {
            amount: amount.to_string(),
            denom: denom.to_string(),
            memo: memo.to_string(),
            receiver: receiver.to_string(),
            sender: sender.to_string(),
        }
    }

    pub fn validate_basic(&self) -> Result<()> {
        // amounts are 256-bit integers in decimal form
        if self.amount.is_empty() || !self.amount.bytes().all(|b| b.is_ascii_digit()) {
            return Err(anyhow!("unable to parse transfer amount {:?}", self.amount));
        }
        if self.amount.bytes().all(|b| b == b'0') {
            return Err(anyhow!("transfer amount must be positive"));
        }
        if self.sender.trim().is_empty() {
            return Err(anyhow!("sender address cannot be blank"));
        }
        if self.receiver.trim().is_empty() {
            return Err(anyhow!("receiver address cannot be blank"));
        }
        if self.denom.trim().is_empty() {
            return Err(anyhow!("denom cannot be blank"));
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
