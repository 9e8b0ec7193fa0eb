use std::sync::Arc;

use linkedpackets_datastore::model::Model;
use linkedpackets_datastore::models::{LinkEnabled, LinkSessionRecord, Params};
use linkedpackets_datastore::Datastore;
use linkedpackets_utils::address::parse_address;

use crate::{Error, LinkSession, Result};

/// Owns the module's persisted state: params, per-channel enablement and the
/// link session.
#[derive(Clone, Debug)]
pub struct Keeper {
    datastore: Arc<Datastore>,
    authority: String,
}

impl Keeper {
    pub fn new(datastore: Arc<Datastore>, authority: &str) -> Result<Self> {
        parse_address(authority).map_err(|source| Error::InvalidAddress { role: "authority", source })?;
        Ok(Self {
            datastore,
            authority: authority.to_string(),
        })
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub async fn params(&self) -> Result<Params> {
        Ok(Params::load(&self.datastore).await?.unwrap_or_default())
    }

    pub async fn set_params(&self, params: &Params) -> Result<()> {
        params.save(&self.datastore).await?;
        Ok(())
    }

    pub async fn is_link_enabled(&self, port_id: &str, channel_id: &str) -> Result<bool> {
        Ok(LinkEnabled::is_enabled(&self.datastore, port_id, channel_id).await?)
    }

    pub async fn set_link_enabled(&self, port_id: &str, channel_id: &str) -> Result<()> {
        LinkEnabled::enable(&self.datastore, port_id, channel_id).await?;
        Ok(())
    }

    pub async fn link_enabled_channels(&self) -> Result<Vec<LinkEnabled>> {
        Ok(LinkEnabled::find_all(&self.datastore).await?)
    }

    /// Raw stored session; idle when nothing was ever written.
    pub async fn link_session_record(&self) -> Result<LinkSessionRecord> {
        Ok(LinkSessionRecord::load(&self.datastore).await?.unwrap_or_default())
    }

    pub async fn link_session(&self) -> Result<LinkSession> {
        LinkSession::try_from(self.link_session_record().await?)
    }

    /// The whole session is one record, so every transition lands in a
    /// single write.
    pub async fn set_link_session(&self, session: &LinkSession) -> Result<()> {
        LinkSessionRecord::from(session).save(&self.datastore).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkedpackets_utils::keypair::Keypair;

    fn keeper() -> anyhow::Result<Keeper> {
        let datastore = Arc::new(Datastore::open_temporary()?);
        let authority = Keypair::generate()?.as_public_address();
        Ok(Keeper::new(datastore, &authority)?)
    }

    #[test]
    fn test_rejects_malformed_authority() -> anyhow::Result<()> {
        let datastore = Arc::new(Datastore::open_temporary()?);
        let result = Keeper::new(datastore, "not-an-address");
        assert!(matches!(result, Err(Error::InvalidAddress { role: "authority", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_defaults() -> anyhow::Result<()> {
        let keeper = keeper()?;
        assert_eq!(keeper.params().await?, Params::default());
        assert_eq!(keeper.link_session().await?, LinkSession::Idle);
        assert!(!keeper.is_link_enabled("transfer", "channel-0").await?);
        assert!(keeper.link_enabled_channels().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_session_persists() -> anyhow::Result<()> {
        let keeper = keeper()?;
        let session = LinkSession::Idle.start("mylinkid")?;
        keeper.set_link_session(&session).await?;
        assert_eq!(keeper.link_session().await?, session);

        keeper.set_link_session(&LinkSession::Idle).await?;
        let record = keeper.link_session_record().await?;
        assert_eq!(record, LinkSessionRecord::idle());
        Ok(())
    }
}
