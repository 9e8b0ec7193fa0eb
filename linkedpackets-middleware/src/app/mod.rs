//! Seams between the middleware, the application it wraps and the relay
//! primitive beneath it.

pub mod ica;
pub mod transfer;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::channel::{Acknowledgement, Counterparty, Height, Order, Packet};
pub use ica::InterchainAccountPacketData;
pub use transfer::FungibleTokenPacketData;

/// Decoded application payload. Only payload kinds that carry a memo can
/// carry link metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PacketData {
    Transfer(FungibleTokenPacketData),
    InterchainAccount(InterchainAccountPacketData),
}

impl PacketData {
    /// Tries each known payload kind in turn.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if let Ok(data) = FungibleTokenPacketData::from_bytes(bytes) {
            return Ok(PacketData::Transfer(data));
        }
        if let Ok(data) = InterchainAccountPacketData::from_bytes(bytes) {
            return Ok(PacketData::InterchainAccount(data));
        }
        Err(anyhow!("payload is neither a token transfer nor an interchain account packet"))
    }

    pub fn memo(&self) -> &str {
        match self {
            PacketData::Transfer(data) => &data.memo,
            PacketData::InterchainAccount(data) => &data.memo,
        }
    }

    pub fn with_memo(self, memo: String) -> Self {
        match self {
            PacketData::Transfer(data) => PacketData::Transfer(FungibleTokenPacketData { memo, ..data }),
            PacketData::InterchainAccount(data) => {
                PacketData::InterchainAccount(InterchainAccountPacketData { memo, ..data })
            }
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            PacketData::Transfer(data) => data.to_bytes(),
            PacketData::InterchainAccount(data) => data.to_bytes(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PacketData::Transfer(_) => "transfer",
            PacketData::InterchainAccount(_) => "interchain-account",
        }
    }
}

/// Channel lifecycle and packet callbacks of an application module.
#[async_trait]
pub trait IbcModule: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn on_chan_open_init(
        &self,
        order: Order,
        connection_hops: &[String],
        port_id: &str,
        channel_id: &str,
        counterparty: &Counterparty,
        version: &str,
    ) -> Result<String>;

    #[allow(clippy::too_many_arguments)]
    async fn on_chan_open_try(
        &self,
        order: Order,
        connection_hops: &[String],
        port_id: &str,
        channel_id: &str,
        counterparty: &Counterparty,
        counterparty_version: &str,
    ) -> Result<String>;

    async fn on_chan_open_ack(
        &self,
        port_id: &str,
        channel_id: &str,
        counterparty_channel_id: &str,
        counterparty_version: &str,
    ) -> Result<()>;

    async fn on_chan_open_confirm(&self, port_id: &str, channel_id: &str) -> Result<()>;

    async fn on_chan_close_init(&self, port_id: &str, channel_id: &str) -> Result<()>;

    async fn on_chan_close_confirm(&self, port_id: &str, channel_id: &str) -> Result<()>;

    async fn on_recv_packet(&self, packet: &Packet, relayer: &str) -> Acknowledgement;

    async fn on_acknowledgement_packet(
        &self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &str,
    ) -> Result<()>;

    async fn on_timeout_packet(&self, packet: &Packet, relayer: &str) -> Result<()>;

    /// Decodes an outgoing payload the way this application encodes it.
    fn unmarshal_packet_data(&self, data: &[u8]) -> Result<PacketData>;
}

/// The outbound relay primitive: commits packets and acknowledgements.
#[async_trait]
pub trait Ics4Wrapper: Send + Sync {
    /// Returns the sequence number the packet was assigned.
    async fn send_packet(
        &self,
        source_port: &str,
        source_channel: &str,
        timeout_height: Height,
        timeout_timestamp: u64,
        data: Vec<u8>,
    ) -> Result<u64>;

    async fn write_acknowledgement(&self, packet: &Packet, acknowledgement: &Acknowledgement) -> Result<()>;

    async fn get_app_version(&self, port_id: &str, channel_id: &str) -> Option<String>;
}
