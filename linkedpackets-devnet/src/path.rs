use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::debug;

use linkedpackets_middleware::channel::{Acknowledgement, Counterparty, Order, Packet};

use crate::TestChain;

const RELAYER: &str = "relayer";

pub struct Endpoint {
    pub chain: Arc<TestChain>,
    pub port_id: String,
    pub channel_id: String,
    /// Version this end settled on, set by the handshake.
    pub version: String,
}

impl Endpoint {
    fn new(chain: Arc<TestChain>) -> Self {
        let port_id = chain.port_id().to_string();
        Self {
            chain,
            port_id,
            channel_id: String::new(),
            version: String::new(),
        }
    }
}

/// A channel between two test chains, opened by driving both handshake
/// sides in order. `a` initiates.
pub struct Path {
    pub a: Endpoint,
    pub b: Endpoint,
    pub order: Order,
    pub connection_hops: Vec<String>,
    proposed_version: String,
}

impl Path {
    pub fn new(a: Arc<TestChain>, b: Arc<TestChain>) -> Self {
        Self {
            a: Endpoint::new(a),
            b: Endpoint::new(b),
            order: Order::Unordered,
            connection_hops: vec!["connection-0".to_string()],
            proposed_version: String::new(),
        }
    }

    /// Version `a` proposes at init. Empty by default.
    pub fn with_version(mut self, version: &str) -> Self {
        self.proposed_version = version.to_string();
        self
    }

    pub async fn handshake(&mut self) -> Result<()> {
        let a_channel = self.a.chain.relay.allocate_channel().await;
        let b_channel = self.b.chain.relay.allocate_channel().await;

        let a_version = self
            .a
            .chain
            .module
            .on_chan_open_init(
                self.order,
                &self.connection_hops,
                &self.a.port_id,
                &a_channel,
                &Counterparty::new(&self.b.port_id, ""),
                &self.proposed_version,
            )
            .await?;
        debug!("{} init {}: {}", self.a.chain.chain_id, a_channel, a_version);

        let b_version = self
            .b
            .chain
            .module
            .on_chan_open_try(
                self.order,
                &self.connection_hops,
                &self.b.port_id,
                &b_channel,
                &Counterparty::new(&self.a.port_id, &a_channel),
                &a_version,
            )
            .await?;
        debug!("{} try {}: {}", self.b.chain.chain_id, b_channel, b_version);

        self.a
            .chain
            .module
            .on_chan_open_ack(&self.a.port_id, &a_channel, &b_channel, &b_version)
            .await?;
        self.b
            .chain
            .module
            .on_chan_open_confirm(&self.b.port_id, &b_channel)
            .await?;

        self.a
            .chain
            .relay
            .open_channel(&self.a.port_id, &a_channel, Counterparty::new(&self.b.port_id, &b_channel), &b_version)
            .await;
        self.b
            .chain
            .relay
            .open_channel(&self.b.port_id, &b_channel, Counterparty::new(&self.a.port_id, &a_channel), &b_version)
            .await;

        self.a.channel_id = a_channel;
        self.a.version = b_version.clone();
        self.b.channel_id = b_channel;
        self.b.version = b_version;
        Ok(())
    }

    /// Delivers `packet` to the opposite end, writes the acknowledgement
    /// there and hands it back to the sender.
    pub async fn relay_packet(&self, packet: &Packet) -> Result<Acknowledgement> {
        let (source, destination) = if packet.source_channel == self.a.channel_id {
            (&self.a, &self.b)
        } else if packet.source_channel == self.b.channel_id {
            (&self.b, &self.a)
        } else {
            return Err(anyhow!("packet from unknown channel {}", packet.source_channel));
        };

        let acknowledgement = destination.chain.module.on_recv_packet(packet, RELAYER).await;
        destination.chain.ics4.write_acknowledgement(packet, &acknowledgement).await?;
        source
            .chain
            .module
            .on_acknowledgement_packet(packet, &acknowledgement, RELAYER)
            .await?;
        Ok(acknowledgement)
    }
}
