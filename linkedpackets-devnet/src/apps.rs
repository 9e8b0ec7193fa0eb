use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use linkedpackets_middleware::app::{
    FungibleTokenPacketData, IbcModule, InterchainAccountPacketData, PacketData,
};
use linkedpackets_middleware::channel::{Acknowledgement, Counterparty, Order, Packet};

pub const TRANSFER_PORT: &str = "transfer";
pub const TRANSFER_VERSION: &str = "ics20-1";
pub const ICA_CONTROLLER_PORT: &str = "icacontroller";
pub const ICA_VERSION: &str = r#"{"version":"ics27-1","controller_connection_id":"connection-0","host_connection_id":"connection-0","encoding":"proto3json","tx_type":"sdk_multi_msg"}"#;

const SUCCESS_ACK: &[u8] = br#"{"result":"AQ=="}"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppKind {
    Transfer,
    InterchainAccount,
}

/// Application that accepts exactly one version and records what it sees.
pub struct MockApp {
    kind: AppKind,
    port_id: String,
    version: String,
    received: Mutex<Vec<Packet>>,
    acknowledged: Mutex<Vec<Packet>>,
    timed_out: Mutex<Vec<Packet>>,
}

impl MockApp {
    fn new(kind: AppKind, port_id: &str, version: &str) -> Self {
        Self {
            kind,
            port_id: port_id.to_string(),
            version: version.to_string(),
            received: Mutex::new(Vec::new()),
            acknowledged: Mutex::new(Vec::new()),
            timed_out: Mutex::new(Vec::new()),
        }
    }

    pub fn transfer() -> Self {
        Self::new(AppKind::Transfer, TRANSFER_PORT, TRANSFER_VERSION)
    }

    pub fn interchain_account() -> Self {
        Self::new(AppKind::InterchainAccount, ICA_CONTROLLER_PORT, ICA_VERSION)
    }

    pub fn kind(&self) -> AppKind {
        self.kind
    }

    pub fn port_id(&self) -> &str {
        &self.port_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub async fn received_packets(&self) -> Vec<Packet> {
        self.received.lock().await.clone()
    }

    pub async fn acknowledged_packets(&self) -> Vec<Packet> {
        self.acknowledged.lock().await.clone()
    }

    pub async fn timed_out_packets(&self) -> Vec<Packet> {
        self.timed_out.lock().await.clone()
    }

    fn check_version(&self, version: &str) -> Result<()> {
        if version != self.version {
            return Err(anyhow!("invalid version: expected {}, got {}", self.version, version));
        }
        Ok(())
    }
}

#[async_trait]
impl IbcModule for MockApp {
    async fn on_chan_open_init(
        &self,
        _order: Order,
        _connection_hops: &[String],
        _port_id: &str,
        _channel_id: &str,
        _counterparty: &Counterparty,
        version: &str,
    ) -> Result<String> {
        if version.is_empty() {
            return Ok(self.version.clone());
        }
        self.check_version(version)?;
        Ok(version.to_string())
    }

    async fn on_chan_open_try(
        &self,
        _order: Order,
        _connection_hops: &[String],
        _port_id: &str,
        _channel_id: &str,
        _counterparty: &Counterparty,
        counterparty_version: &str,
    ) -> Result<String> {
        self.check_version(counterparty_version)?;
        Ok(self.version.clone())
    }

    async fn on_chan_open_ack(
        &self,
        _port_id: &str,
        _channel_id: &str,
        _counterparty_channel_id: &str,
        counterparty_version: &str,
    ) -> Result<()> {
        self.check_version(counterparty_version)
    }

    async fn on_chan_open_confirm(&self, _port_id: &str, _channel_id: &str) -> Result<()> {
        Ok(())
    }

    async fn on_chan_close_init(&self, _port_id: &str, _channel_id: &str) -> Result<()> {
        Err(anyhow!("user cannot close channel"))
    }

    async fn on_chan_close_confirm(&self, _port_id: &str, _channel_id: &str) -> Result<()> {
        Ok(())
    }

    async fn on_recv_packet(&self, packet: &Packet, _relayer: &str) -> Acknowledgement {
        if let Err(e) = self.unmarshal_packet_data(&packet.data) {
            return Acknowledgement::Error(e.to_string());
        }
        self.received.lock().await.push(packet.clone());
        Acknowledgement::Result(SUCCESS_ACK.to_vec())
    }

    async fn on_acknowledgement_packet(
        &self,
        packet: &Packet,
        _acknowledgement: &Acknowledgement,
        _relayer: &str,
    ) -> Result<()> {
        self.acknowledged.lock().await.push(packet.clone());
        Ok(())
    }

    async fn on_timeout_packet(&self, packet: &Packet, _relayer: &str) -> Result<()> {
        self.timed_out.lock().await.push(packet.clone());
        Ok(())
    }

    fn unmarshal_packet_data(&self, data: &[u8]) -> Result<PacketData> {
        match self.kind {
            AppKind::Transfer => Ok(PacketData::Transfer(FungibleTokenPacketData::from_bytes(data)?)),
            AppKind::InterchainAccount => Ok(PacketData::InterchainAccount(
                InterchainAccountPacketData::from_bytes(data)?,
            )),
        }
    }
}
