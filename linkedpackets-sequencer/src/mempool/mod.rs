pub mod insertion_order;

pub use insertion_order::InsertionOrderMempool;

use anyhow::Result;

use crate::tx::Tx;

/// Pool of pending transactions a proposer draws from.
#[async_trait::async_trait]
pub trait Mempool: Send + Sync {
    async fn insert(&self, tx: Tx) -> Result<()>;
    /// Candidates in pool order. Selecting does not remove them.
    async fn select(&self) -> Result<Vec<Tx>>;
    async fn count(&self) -> usize;
}
