use linkedpackets_datastore::models::LinkSessionRecord;

use crate::{Error, LinkData, PacketIdentifier, Result};

/// The chain's single link session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LinkSession {
    #[default]
    Idle,
    Linking(ActiveLink),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveLink {
    pub link_id: String,
    /// Last packet sent in this link, `None` before the first one.
    pub prev_packet: Option<PacketIdentifier>,
    /// Index the next stamped packet receives.
    pub next_index: u64,
}

impl LinkSession {
    pub fn is_linking(&self) -> bool {
        matches!(self, LinkSession::Linking(_))
    }

    pub fn link_id(&self) -> Option<&str> {
        match self {
            LinkSession::Idle => None,
            LinkSession::Linking(active) => Some(&active.link_id),
        }
    }

    pub fn start(&self, link_id: &str) -> Result<LinkSession> {
        if link_id.trim().is_empty() {
            return Err(Error::InvalidLinkId(link_id.to_string()));
        }
        match self {
            LinkSession::Linking(active) => Err(Error::SessionAlreadyActive(active.link_id.clone())),
            LinkSession::Idle => Ok(LinkSession::Linking(ActiveLink {
                link_id: link_id.to_string(),
                prev_packet: None,
                next_index: 0,
            })),
        }
    }

    pub fn stop(&self) -> LinkSession {
        LinkSession::Idle
    }
}

impl ActiveLink {
    /// Link metadata for the next packet of this link.
    pub fn stamp(&self, is_last_packet: bool) -> LinkData {
        LinkData::new(
            &self.link_id,
            self.prev_packet.clone().unwrap_or_default(),
            is_last_packet,
            self.next_index,
        )
    }

    /// Session after `sent` went out carrying [`ActiveLink::stamp`]'s data.
    pub fn advance(self, sent: PacketIdentifier, is_last_packet: bool) -> LinkSession {
        if is_last_packet {
            return LinkSession::Idle;
        }
        LinkSession::Linking(ActiveLink {
            link_id: self.link_id,
            prev_packet: Some(sent),
            next_index: self.next_index + 1,
        })
    }
}

impl TryFrom<LinkSessionRecord> for LinkSession {
    type Error = Error;

    fn try_from(record: LinkSessionRecord) -> Result<Self> {
        if !record.linking {
            return Ok(LinkSession::Idle);
        }
        let link_id = match record.link_id {
            Some(link_id) if !link_id.is_empty() => link_id,
            _ => return Err(Error::MissingLinkId),
        };
        Ok(LinkSession::Linking(ActiveLink {
            link_id,
            prev_packet: record.prev_packet.filter(|prev| !prev.is_sentinel()),
            next_index: record.link_index.unwrap_or(0),
        }))
    }
}

impl From<&LinkSession> for LinkSessionRecord {
    fn from(session: &LinkSession) -> Self {
        match session {
            LinkSession::Idle => LinkSessionRecord::idle(),
            LinkSession::Linking(active) => LinkSessionRecord {
                linking: true,
                link_id: Some(active.link_id.clone()),
                prev_packet: active.prev_packet.clone(),
                link_index: Some(active.next_index),
            },
        }
    }
}
