use anyhow::Result;
use tokio::sync::Mutex;

use super::Mempool;
use crate::tx::Tx;

#[derive(Default)]
pub struct InsertionOrderMempool {
    txs: Mutex<Vec<Tx>>,
}

impl InsertionOrderMempool {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Mempool for InsertionOrderMempool {
    async fn insert(&self, tx: Tx) -> Result<()> {
        self.txs.lock().await.push(tx);
        Ok(())
    }

    async fn select(&self) -> Result<Vec<Tx>> {
        Ok(self.txs.lock().await.clone())
    }

    async fn count(&self) -> usize {
        self.txs.lock().await.len()
    }
}
