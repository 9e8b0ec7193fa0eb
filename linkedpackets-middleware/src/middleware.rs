use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::app::{IbcModule, Ics4Wrapper, PacketData};
use crate::channel::{Acknowledgement, Counterparty, Height, Order, Packet};
use crate::keeper::Keeper;

/// Sits between an application module and the relay primitive.
///
/// Towards the relay it is the application ([`IbcModule`]); towards the
/// application it is the relay ([`Ics4Wrapper`]). Handshake callbacks
/// negotiate link enablement, `send_packet` stamps link metadata, and every
/// other callback passes through untouched.
#[derive(Clone)]
pub struct IbcMiddleware {
    pub(crate) app: Arc<dyn IbcModule>,
    pub(crate) ics4_wrapper: Arc<dyn Ics4Wrapper>,
    pub(crate) keeper: Keeper,
}

impl IbcMiddleware {
    pub fn new(app: Arc<dyn IbcModule>, ics4_wrapper: Arc<dyn Ics4Wrapper>, keeper: Keeper) -> Self {
        Self {
            app,
            ics4_wrapper,
            keeper,
        }
    }

    pub fn keeper(&self) -> &Keeper {
        &self.keeper
    }
}

#[async_trait]
impl IbcModule for IbcMiddleware {
    async fn on_chan_open_init(
        &self,
        order: Order,
        connection_hops: &[String],
        port_id: &str,
        channel_id: &str,
        counterparty: &Counterparty,
        version: &str,
    ) -> Result<String> {
        Ok(self
            .negotiate_open_init(order, connection_hops, port_id, channel_id, counterparty, version)
            .await?)
    }

    async fn on_chan_open_try(
        &self,
        order: Order,
        connection_hops: &[String],
        port_id: &str,
        channel_id: &str,
        counterparty: &Counterparty,
        counterparty_version: &str,
    ) -> Result<String> {
        Ok(self
            .negotiate_open_try(order, connection_hops, port_id, channel_id, counterparty, counterparty_version)
            .await?)
    }

    async fn on_chan_open_ack(
        &self,
        port_id: &str,
        channel_id: &str,
        counterparty_channel_id: &str,
        counterparty_version: &str,
    ) -> Result<()> {
        Ok(self
            .negotiate_open_ack(port_id, channel_id, counterparty_channel_id, counterparty_version)
            .await?)
    }

    async fn on_chan_open_confirm(&self, port_id: &str, channel_id: &str) -> Result<()> {
        self.app.on_chan_open_confirm(port_id, channel_id).await
    }

    async fn on_chan_close_init(&self, port_id: &str, channel_id: &str) -> Result<()> {
        self.app.on_chan_close_init(port_id, channel_id).await
    }

    async fn on_chan_close_confirm(&self, port_id: &str, channel_id: &str) -> Result<()> {
        self.app.on_chan_close_confirm(port_id, channel_id).await
    }

    async fn on_recv_packet(&self, packet: &Packet, relayer: &str) -> Acknowledgement {
        self.app.on_recv_packet(packet, relayer).await
    }

    async fn on_acknowledgement_packet(
        &self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &str,
    ) -> Result<()> {
        self.app.on_acknowledgement_packet(packet, acknowledgement, relayer).await
    }

    async fn on_timeout_packet(&self, packet: &Packet, relayer: &str) -> Result<()> {
        self.app.on_timeout_packet(packet, relayer).await
    }

    fn unmarshal_packet_data(&self, data: &[u8]) -> Result<PacketData> {
        self.app.unmarshal_packet_data(data)
    }
}

#[async_trait]
impl Ics4Wrapper for IbcMiddleware {
    async fn send_packet(
        &self,
        source_port: &str,
        source_channel: &str,
        timeout_height: Height,
        timeout_timestamp: u64,
        data: Vec<u8>,
    ) -> Result<u64> {
        Ok(self
            .send_linked_packet(source_port, source_channel, timeout_height, timeout_timestamp, data)
            .await?)
    }

    async fn write_acknowledgement(&self, packet: &Packet, acknowledgement: &Acknowledgement) -> Result<()> {
        self.ics4_wrapper.write_acknowledgement(packet, acknowledgement).await
    }

    async fn get_app_version(&self, port_id: &str, channel_id: &str) -> Option<String> {
        self.ics4_wrapper.get_app_version(port_id, channel_id).await
    }
}
