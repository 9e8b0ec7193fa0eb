pub mod link_enabled;
pub mod link_session;
pub mod params;

pub use link_enabled::LinkEnabled;
pub use link_session::{LinkSessionRecord, PacketIdentifier};
pub use params::Params;
