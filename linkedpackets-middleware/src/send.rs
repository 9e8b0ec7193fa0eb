use log::{debug, info, warn};

use crate::channel::Height;
use crate::{Error, IbcMiddleware, LinkSession, PacketIdentifier, Result, LAST_LINK_MEMO_KEY};

impl IbcMiddleware {
    /// Stamps outgoing packets while a link session is active.
    ///
    /// Packets on channels that did not negotiate the extension, and all
    /// packets while idle, reach the relay byte-for-byte unchanged. The
    /// session only advances after the relay accepted the stamped packet.
    pub(crate) async fn send_linked_packet(
        &self,
        source_port: &str,
        source_channel: &str,
        timeout_height: Height,
        timeout_timestamp: u64,
        data: Vec<u8>,
    ) -> Result<u64> {
        let record = match self.keeper.link_session_record().await {
            Ok(record) => record,
            Err(e) => {
                warn!("unable to read link session, sending unlinked: {}", e);
                return self
                    .forward_packet(source_port, source_channel, timeout_height, timeout_timestamp, data)
                    .await;
            }
        };
        if !record.linking {
            return self
                .forward_packet(source_port, source_channel, timeout_height, timeout_timestamp, data)
                .await;
        }

        let enabled = match self.keeper.is_link_enabled(source_port, source_channel).await {
            Ok(enabled) => enabled,
            Err(e) => {
                warn!("unable to read link enablement for {}/{}: {}", source_port, source_channel, e);
                false
            }
        };
        if !enabled {
            debug!("{}/{} is not link enabled, sending unlinked", source_port, source_channel);
            return self
                .forward_packet(source_port, source_channel, timeout_height, timeout_timestamp, data)
                .await;
        }

        let packet_data = self
            .app
            .unmarshal_packet_data(&data)
            .map_err(|e| Error::InvalidPacketData(e.to_string()))?;

        let active = match LinkSession::try_from(record)? {
            LinkSession::Linking(active) => active,
            LinkSession::Idle => {
                return self
                    .forward_packet(source_port, source_channel, timeout_height, timeout_timestamp, data)
                    .await
            }
        };

        let kind = packet_data.kind();
        let is_last_packet = packet_data.memo().contains(LAST_LINK_MEMO_KEY);
        let link_data = active.stamp(is_last_packet);
        let stamped = packet_data
            .with_memo(link_data.to_memo()?)
            .to_bytes()
            .map_err(|e| Error::InvalidPacketData(e.to_string()))?;

        let sequence = self
            .ics4_wrapper
            .send_packet(source_port, source_channel, timeout_height, timeout_timestamp, stamped)
            .await?;

        let sent = PacketIdentifier::new(source_port, source_channel, sequence);
        info!(
            "sent {} packet {} of link {} at index {}{}",
            kind,
            sent,
            active.link_id,
            active.next_index,
            if is_last_packet { " (last)" } else { "" }
        );
        let next = active.advance(sent, is_last_packet);
        self.keeper.set_link_session(&next).await?;
        Ok(sequence)
    }

    async fn forward_packet(
        &self,
        source_port: &str,
        source_channel: &str,
        timeout_height: Height,
        timeout_timestamp: u64,
        data: Vec<u8>,
    ) -> Result<u64> {
        Ok(self
            .ics4_wrapper
            .send_packet(source_port, source_channel, timeout_height, timeout_timestamp, data)
            .await?)
    }
}
