use std::collections::{BTreeMap, HashMap};

use log::debug;

use linkedpackets_middleware::app::PacketData;
use linkedpackets_middleware::LinkData;

use crate::tx::Msg;

/// Link membership decoded from one received packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkedPacket {
    pub link_id: String,
    pub index: u64,
    pub is_last: bool,
}

impl LinkedPacket {
    /// `None` unless `msg` receives a transfer or interchain account packet
    /// whose memo is link data with a valid index.
    pub fn from_msg(msg: &Msg) -> Option<Self> {
        let Msg::RecvPacket(recv) = msg else {
            return None;
        };
        let packet_data = PacketData::decode(&recv.packet.data).ok()?;
        let link_data = LinkData::from_memo(packet_data.memo()).ok()?;
        let index = link_data.index()?;
        // a last packet must leave room for its declared total
        if link_data.is_last_packet && index.checked_add(1).is_none() {
            return None;
        }
        Some(Self {
            link_id: link_data.link_id,
            index,
            is_last: link_data.is_last_packet,
        })
    }
}

#[derive(Debug)]
struct LinkGroup {
    link_id: String,
    positions: BTreeMap<u64, usize>,
    declared_total: Option<u64>,
}

impl LinkGroup {
    fn is_complete(&self) -> bool {
        match self.declared_total {
            Some(total) => {
                self.positions.len() as u64 == total && (0..total).all(|i| self.positions.contains_key(&i))
            }
            None => false,
        }
    }
}

/// Linked transactions of one proposal, grouped by link id in first-seen
/// order. Each group maps a link index to the transaction's position among
/// the proposal candidates.
#[derive(Debug, Default)]
pub struct ProposalBuffer {
    groups: Vec<LinkGroup>,
    by_link_id: HashMap<String, usize>,
}

impl ProposalBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A later transaction at an already buffered index replaces the earlier one.
    pub fn insert(&mut self, link: &LinkedPacket, position: usize) {
        let slot = match self.by_link_id.get(&link.link_id) {
            Some(&slot) => slot,
            None => {
                self.groups.push(LinkGroup {
                    link_id: link.link_id.clone(),
                    positions: BTreeMap::new(),
                    declared_total: None,
                });
                self.by_link_id.insert(link.link_id.clone(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        let group = &mut self.groups[slot];
        group.positions.insert(link.index, position);
        if link.is_last {
            group.declared_total = link.index.checked_add(1);
        }
    }

    /// Candidate positions of every complete link in index order, each
    /// position at most once. Incomplete links are dropped from this proposal.
    pub fn into_complete(self) -> Vec<usize> {
        let mut emitted = Vec::new();
        for group in self.groups {
            if group.is_complete() {
                for position in group.positions.into_values() {
                    if !emitted.contains(&position) {
                        emitted.push(position);
                    }
                }
            } else {
                debug!(
                    "withholding link {}: {} of {} packets",
                    group.link_id,
                    group.positions.len(),
                    group
                        .declared_total
                        .map(|total| total.to_string())
                        .unwrap_or_else(|| "?".to_string())
                );
            }
        }
        emitted
    }
}
