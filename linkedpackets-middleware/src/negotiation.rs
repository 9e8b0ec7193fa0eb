use log::{debug, info};

use crate::channel::{Counterparty, Order};
use crate::{Error, IbcMiddleware, Metadata, Result, VERSION};

impl IbcMiddleware {
    /// An empty proposal requests the extension with an empty application
    /// version. A proposal that does not carry the extension is handed to
    /// the application unchanged and leaves the channel unlinked.
    pub(crate) async fn negotiate_open_init(
        &self,
        order: Order,
        connection_hops: &[String],
        port_id: &str,
        channel_id: &str,
        counterparty: &Counterparty,
        version: &str,
    ) -> Result<String> {
        let metadata = match requested_metadata(version) {
            Some(metadata) => metadata,
            None => {
                debug!("channel {}/{} opened without linked packets", port_id, channel_id);
                return Ok(self
                    .app
                    .on_chan_open_init(order, connection_hops, port_id, channel_id, counterparty, version)
                    .await?);
            }
        };
        if !metadata.has_supported_version() {
            return Err(Error::InvalidVersion(format!(
                "expected {}, got {}",
                VERSION, metadata.linked_packets_version
            )));
        }

        let app_version = self
            .app
            .on_chan_open_init(order, connection_hops, port_id, channel_id, counterparty, &metadata.app_version)
            .await?;

        let version = Metadata::new(&app_version).to_version()?;
        self.keeper.set_link_enabled(port_id, channel_id).await?;
        info!("linked packets enabled on {}/{} (init)", port_id, channel_id);
        Ok(version)
    }

    pub(crate) async fn negotiate_open_try(
        &self,
        order: Order,
        connection_hops: &[String],
        port_id: &str,
        channel_id: &str,
        counterparty: &Counterparty,
        counterparty_version: &str,
    ) -> Result<String> {
        let metadata = match requested_metadata(counterparty_version) {
            Some(metadata) => metadata,
            None => {
                debug!("channel {}/{} opened without linked packets", port_id, channel_id);
                return Ok(self
                    .app
                    .on_chan_open_try(order, connection_hops, port_id, channel_id, counterparty, counterparty_version)
                    .await?);
            }
        };
        if !metadata.has_supported_version() {
            return Err(Error::InvalidVersion(format!(
                "expected {}, got {}",
                VERSION, metadata.linked_packets_version
            )));
        }

        let app_version = self
            .app
            .on_chan_open_try(order, connection_hops, port_id, channel_id, counterparty, &metadata.app_version)
            .await?;

        let version = Metadata::new(&app_version).to_version()?;
        self.keeper.set_link_enabled(port_id, channel_id).await?;
        info!("linked packets enabled on {}/{} (try)", port_id, channel_id);
        Ok(version)
    }

    /// Once the local end enabled the extension the counterparty must answer
    /// with it too.
    pub(crate) async fn negotiate_open_ack(
        &self,
        port_id: &str,
        channel_id: &str,
        counterparty_channel_id: &str,
        counterparty_version: &str,
    ) -> Result<()> {
        if !self.keeper.is_link_enabled(port_id, channel_id).await? {
            return Ok(self
                .app
                .on_chan_open_ack(port_id, channel_id, counterparty_channel_id, counterparty_version)
                .await?);
        }

        let metadata = Metadata::from_version(counterparty_version)?;
        if !metadata.has_supported_version() {
            return Err(Error::InvalidVersion(format!(
                "expected counterparty version {}, got {}",
                VERSION, metadata.linked_packets_version
            )));
        }

        Ok(self
            .app
            .on_chan_open_ack(port_id, channel_id, counterparty_channel_id, &metadata.app_version)
            .await?)
    }
}

/// `None` when `version` does not request the extension.
fn requested_metadata(version: &str) -> Option<Metadata> {
    if version.trim().is_empty() {
        return Some(Metadata::new(""));
    }
    Metadata::from_version(version).ok()
}
