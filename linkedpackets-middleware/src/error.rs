use linkedpackets_utils::address::AddressError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid linked packets middleware version: {0}")]
    InvalidVersion(String),

    #[error("invalid packet data: {0}")]
    InvalidPacketData(String),

    #[error("invalid {role} address: {source}")]
    InvalidAddress {
        role: &'static str,
        #[source]
        source: AddressError,
    },

    #[error("unauthorized, authority does not match the module's authority: got {got}, want {want}")]
    Unauthorized { got: String, want: String },

    #[error("invalid link id: {0:?}")]
    InvalidLinkId(String),

    #[error("link session already active with link id {0}")]
    SessionAlreadyActive(String),

    #[error("link session is active but has no link id")]
    MissingLinkId,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
