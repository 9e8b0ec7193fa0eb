use crate::model::Model;
use crate::Datastore;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Marks a `(port_id, channel_id)` pair whose handshake negotiated linked
/// packets. Presence of the record is the enablement; entries are never
/// removed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkEnabled {
    pub port_id: String,
    pub channel_id: String,
}

const PREFIX: &str = "/linkedpackets/link_enabled";

#[async_trait]
impl Model for LinkEnabled {
    const KEY_TEMPLATE: &'static str = "/linkedpackets/link_enabled/${port_id}/${channel_id}";

    fn key_params(&self) -> HashMap<String, String> {
        let mut keys = HashMap::new();
        keys.insert("port_id".to_string(), self.port_id.clone());
        keys.insert("channel_id".to_string(), self.channel_id.clone());
        keys
    }
}

impl LinkEnabled {
    pub fn new(port_id: &str, channel_id: &str) -> Self {
        Self {
            port_id: port_id.to_string(),
            channel_id: channel_id.to_string(),
        }
    }

    pub async fn is_enabled(datastore: &Datastore, port_id: &str, channel_id: &str) -> Result<bool> {
        Self::exists(datastore, &Self::new(port_id, channel_id).key_params()).await
    }

    /// Idempotent: re-enabling an existing pair rewrites the same record.
    pub async fn enable(datastore: &Datastore, port_id: &str, channel_id: &str) -> Result<()> {
        Self::new(port_id, channel_id).save(datastore).await
    }

    pub async fn find_all(datastore: &Datastore) -> Result<Vec<Self>> {
        let mut entries = Vec::new();
        for entry in datastore.scan(PREFIX) {
            let (_, value) = entry?;
            entries.push(Self::decode(&String::from_utf8(value)?)?);
        }
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enable_is_idempotent() -> Result<()> {
        let datastore = Datastore::open_temporary()?;
        assert!(!LinkEnabled::is_enabled(&datastore, "transfer", "channel-0").await?);

        LinkEnabled::enable(&datastore, "transfer", "channel-0").await?;
        LinkEnabled::enable(&datastore, "transfer", "channel-0").await?;

        assert!(LinkEnabled::is_enabled(&datastore, "transfer", "channel-0").await?);
        assert!(!LinkEnabled::is_enabled(&datastore, "transfer", "channel-1").await?);
        assert_eq!(LinkEnabled::find_all(&datastore).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_all_sorted() -> Result<()> {
        let datastore = Datastore::open_temporary()?;
        LinkEnabled::enable(&datastore, "transfer", "channel-2").await?;
        LinkEnabled::enable(&datastore, "icacontroller-abc", "channel-0").await?;
        LinkEnabled::enable(&datastore, "transfer", "channel-1").await?;

        let all = LinkEnabled::find_all(&datastore).await?;
        assert_eq!(
            all,
            vec![
                LinkEnabled::new("icacontroller-abc", "channel-0"),
                LinkEnabled::new("transfer", "channel-1"),
                LinkEnabled::new("transfer", "channel-2"),
            ]
        );
        Ok(())
    }
}
