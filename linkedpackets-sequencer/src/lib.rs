//! Block proposal assembly that holds back linked packet receipts until a
//! link is complete, then emits it in index order.

pub mod buffer;
pub mod encoder;
pub mod error;
pub mod mempool;
pub mod proposal;
pub mod tx;

pub use error::{SequencerError, Result};
pub use proposal::{order_transactions, PrepareProposalHandler, ProcessProposalHandler};
pub use tx::{Msg, MsgRecvPacket, Tx};
