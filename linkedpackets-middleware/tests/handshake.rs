#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use linkedpackets_devnet::apps::{ICA_VERSION, TRANSFER_VERSION};
    use linkedpackets_devnet::{MockApp, Path, TestChain};
    use linkedpackets_middleware::channel::{Counterparty, Order};
    use linkedpackets_middleware::{Error, Metadata};

    fn transfer_chains() -> Result<(Arc<TestChain>, Arc<TestChain>)> {
        Ok((
            Arc::new(TestChain::new("chain-a", MockApp::transfer())?),
            Arc::new(TestChain::new("chain-b", MockApp::transfer())?),
        ))
    }

    #[tokio::test]
    async fn test_empty_version_enables_both_ends() -> Result<()> {
        let (a, b) = transfer_chains()?;
        let mut path = Path::new(a.clone(), b.clone());
        path.handshake().await?;

        let expected = Metadata::new(TRANSFER_VERSION).to_version()?;
        assert_eq!(path.a.version, expected);
        assert_eq!(
            path.a.version,
            r#"{"linked_packets_version":"ics29-1","app_version":"ics20-1"}"#
        );
        assert!(a.keeper.is_link_enabled("transfer", &path.a.channel_id).await?);
        assert!(b.keeper.is_link_enabled("transfer", &path.b.channel_id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_explicit_metadata_enables_both_ends() -> Result<()> {
        let (a, b) = transfer_chains()?;
        let version = Metadata::new(TRANSFER_VERSION).to_version()?;
        let mut path = Path::new(a.clone(), b.clone()).with_version(&version);
        path.handshake().await?;

        assert_eq!(path.b.version, version);
        assert!(a.keeper.is_link_enabled("transfer", &path.a.channel_id).await?);
        assert!(b.keeper.is_link_enabled("transfer", &path.b.channel_id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_plain_version_passes_through() -> Result<()> {
        let (a, b) = transfer_chains()?;
        let mut path = Path::new(a.clone(), b.clone()).with_version(TRANSFER_VERSION);
        path.handshake().await?;

        assert_eq!(path.a.version, TRANSFER_VERSION);
        assert!(!a.keeper.is_link_enabled("transfer", &path.a.channel_id).await?);
        assert!(!b.keeper.is_link_enabled("transfer", &path.b.channel_id).await?);
        assert!(a.query_server().link_enabled_channels().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unsupported_version_rejected_at_init() -> Result<()> {
        let (a, b) = transfer_chains()?;
        let mut path = Path::new(a.clone(), b)
            .with_version(r#"{"linked_packets_version":"ics29-2","app_version":"ics20-1"}"#);

        let err = path.handshake().await.unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::InvalidVersion(_))));
        assert!(a.keeper.link_enabled_channels().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unsupported_version_rejected_at_try() -> Result<()> {
        let (_, b) = transfer_chains()?;
        let result = b
            .module
            .on_chan_open_try(
                Order::Unordered,
                &["connection-0".to_string()],
                "transfer",
                "channel-0",
                &Counterparty::new("transfer", "channel-0"),
                r#"{"linked_packets_version":"ics29-2","app_version":"ics20-1"}"#,
            )
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::InvalidVersion(_))));
        assert!(!b.keeper.is_link_enabled("transfer", "channel-0").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_app_rejection_leaves_channel_unlinked() -> Result<()> {
        let (a, b) = transfer_chains()?;
        let version = Metadata::new("ics20-9").to_version()?;
        let mut path = Path::new(a.clone(), b).with_version(&version);

        assert!(path.handshake().await.is_err());
        assert!(a.keeper.link_enabled_channels().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_ack_requires_metadata_once_enabled() -> Result<()> {
        let (a, _) = transfer_chains()?;
        let hops = vec!["connection-0".to_string()];
        a.module
            .on_chan_open_init(
                Order::Unordered,
                &hops,
                "transfer",
                "channel-0",
                &Counterparty::new("transfer", ""),
                "",
            )
            .await?;
        assert!(a.keeper.is_link_enabled("transfer", "channel-0").await?);

        let err = a
            .module
            .on_chan_open_ack("transfer", "channel-0", "channel-7", TRANSFER_VERSION)
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::InvalidVersion(_))));

        let version = Metadata::new(TRANSFER_VERSION).to_version()?;
        a.module
            .on_chan_open_ack("transfer", "channel-0", "channel-7", &version)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_unlinked_counterparty_fails_handshake() -> Result<()> {
        let a = Arc::new(TestChain::new("chain-a", MockApp::transfer())?);
        let b = Arc::new(TestChain::new_unlinked("chain-b", MockApp::transfer())?);
        let mut path = Path::new(a, b.clone());

        // the bare application does not understand the wrapped version
        assert!(path.handshake().await.is_err());
        assert!(b.keeper.link_enabled_channels().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_interchain_account_channel() -> Result<()> {
        let a = Arc::new(TestChain::new("controller", MockApp::interchain_account())?);
        let b = Arc::new(TestChain::new("host", MockApp::interchain_account())?);
        let mut path = Path::new(a.clone(), b.clone());
        path.handshake().await?;

        let metadata = Metadata::from_version(&path.a.version)?;
        assert_eq!(metadata.app_version, ICA_VERSION);
        assert!(a.keeper.is_link_enabled("icacontroller", &path.a.channel_id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_close_passes_through() -> Result<()> {
        let (a, b) = transfer_chains()?;
        let mut path = Path::new(a.clone(), b.clone());
        path.handshake().await?;

        assert!(a.module.on_chan_close_init("transfer", &path.a.channel_id).await.is_err());
        b.module.on_chan_close_confirm("transfer", &path.b.channel_id).await?;
        Ok(())
    }
}
