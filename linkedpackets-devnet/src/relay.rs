use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use linkedpackets_middleware::app::Ics4Wrapper;
use linkedpackets_middleware::channel::{Acknowledgement, Counterparty, Height, Packet};

type ChannelKey = (String, String);

#[derive(Default)]
struct RelayState {
    next_channel: u64,
    next_sequence: HashMap<ChannelKey, u64>,
    counterparties: HashMap<ChannelKey, Counterparty>,
    versions: HashMap<ChannelKey, String>,
    sent: Vec<Packet>,
    acknowledgements: Vec<(Packet, Acknowledgement)>,
}

/// Channel keeper of a single test chain. Sequences start at 1 per channel.
#[derive(Default)]
pub struct MockRelay {
    state: Mutex<RelayState>,
    reject_sends: AtomicBool,
}

impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn allocate_channel(&self) -> String {
        let mut state = self.state.lock().await;
        let channel_id = format!("channel-{}", state.next_channel);
        state.next_channel += 1;
        channel_id
    }

    pub async fn open_channel(&self, port_id: &str, channel_id: &str, counterparty: Counterparty, version: &str) {
        let key = (port_id.to_string(), channel_id.to_string());
        let mut state = self.state.lock().await;
        state.counterparties.insert(key.clone(), counterparty);
        state.versions.insert(key, version.to_string());
    }

    /// Makes every following `send_packet` fail until reset.
    pub fn set_reject_sends(&self, reject: bool) {
        self.reject_sends.store(reject, Ordering::SeqCst);
    }

    pub async fn sent_packets(&self) -> Vec<Packet> {
        self.state.lock().await.sent.clone()
    }

    pub async fn last_sent_packet(&self) -> Option<Packet> {
        self.state.lock().await.sent.last().cloned()
    }

    pub async fn acknowledgements(&self) -> Vec<(Packet, Acknowledgement)> {
        self.state.lock().await.acknowledgements.clone()
    }
}

#[async_trait]
impl Ics4Wrapper for MockRelay {
    async fn send_packet(
        &self,
        source_port: &str,
        source_channel: &str,
        timeout_height: Height,
        timeout_timestamp: u64,
        data: Vec<u8>,
    ) -> Result<u64> {
        if self.reject_sends.load(Ordering::SeqCst) {
            return Err(anyhow!("packet rejected on {}/{}", source_port, source_channel));
        }
        let key = (source_port.to_string(), source_channel.to_string());
        let mut state = self.state.lock().await;
        let next = state.next_sequence.entry(key.clone()).or_insert(1);
        let sequence = *next;
        *next += 1;

        let destination = state.counterparties.get(&key).cloned().unwrap_or_default();
        state.sent.push(Packet {
            sequence,
            source_port: source_port.to_string(),
            source_channel: source_channel.to_string(),
            destination_port: destination.port_id,
            destination_channel: destination.channel_id,
            data,
            timeout_height,
            timeout_timestamp,
        });
        Ok(sequence)
    }

    async fn write_acknowledgement(&self, packet: &Packet, acknowledgement: &Acknowledgement) -> Result<()> {
        let mut state = self.state.lock().await;
        state.acknowledgements.push((packet.clone(), acknowledgement.clone()));
        Ok(())
    }

    async fn get_app_version(&self, port_id: &str, channel_id: &str) -> Option<String> {
        let key = (port_id.to_string(), channel_id.to_string());
        self.state.lock().await.versions.get(&key).cloned()
    }
}
