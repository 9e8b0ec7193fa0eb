//! Linked packets middleware.
//!
//! Wraps an application module and the relay primitive below it. During the
//! channel handshake it negotiates whether a channel carries linked packets;
//! while a link session is active it stamps every packet sent on such a
//! channel with a [`LinkData`] record in the payload memo.

pub mod app;
pub mod channel;
pub mod error;
pub mod keeper;
pub mod link_data;
pub mod link_session;
pub mod metadata;
pub mod middleware;
pub mod msg_server;
pub mod query_server;

mod negotiation;
mod send;

pub use error::{Error, Result};
pub use keeper::Keeper;
pub use link_data::LinkData;
pub use link_session::{ActiveLink, LinkSession};
pub use metadata::Metadata;
pub use middleware::IbcMiddleware;

pub use linkedpackets_datastore::models::{PacketIdentifier, Params};

pub const MODULE_NAME: &str = "linkedpackets";

/// Handshake version of the linked packets extension.
pub const VERSION: &str = "ics29-1";

/// Substring of an application memo that marks the final packet of a link.
pub const LAST_LINK_MEMO_KEY: &str = "last_link";
