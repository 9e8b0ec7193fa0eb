use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::buffer::{LinkedPacket, ProposalBuffer};
use crate::encoder::TxEncoder;
use crate::error::{Result, SequencerError};
use crate::mempool::Mempool;
use crate::tx::Tx;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestPrepareProposal {
    pub height: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponsePrepareProposal {
    pub txs: Vec<Vec<u8>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestProcessProposal {
    pub height: u64,
    pub txs: Vec<Vec<u8>>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalStatus {
    Accept,
    Reject,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponseProcessProposal {
    pub status: ProposalStatus,
}

/// Orders proposal candidates: transactions without a linked packet first in
/// pool order, then each complete link in index order. A transaction that
/// carries several linked packets appears at most once.
pub fn order_transactions(candidates: Vec<Tx>) -> Vec<Tx> {
    let mut buffer = ProposalBuffer::new();
    let mut pass_through = Vec::new();
    let mut linked: Vec<Option<Tx>> = Vec::with_capacity(candidates.len());

    for tx in candidates {
        let links: Vec<LinkedPacket> = tx.msgs.iter().filter_map(LinkedPacket::from_msg).collect();
        if links.is_empty() {
            pass_through.push(tx);
            continue;
        }
        let position = linked.len();
        for link in &links {
            debug!("link {} index {} buffered", link.link_id, link.index);
            buffer.insert(link, position);
        }
        linked.push(Some(tx));
    }

    info!("{} transactions without linked packets", pass_through.len());
    for position in buffer.into_complete() {
        if let Some(tx) = linked.get_mut(position).and_then(Option::take) {
            pass_through.push(tx);
        }
    }
    pass_through
}

pub struct PrepareProposalHandler {
    mempool: Arc<dyn Mempool>,
    tx_encoder: Arc<dyn TxEncoder>,
}

impl PrepareProposalHandler {
    pub fn new(mempool: Arc<dyn Mempool>, tx_encoder: Arc<dyn TxEncoder>) -> Self {
        Self { mempool, tx_encoder }
    }

    pub async fn prepare_proposal(&self, req: &RequestPrepareProposal) -> Result<ResponsePrepareProposal> {
        info!(
            "preparing proposal at height {} from {} pooled transactions",
            req.height,
            self.mempool.count().await
        );
        let candidates = self.mempool.select().await.map_err(SequencerError::Mempool)?;

        let mut txs = Vec::new();
        for tx in order_transactions(candidates) {
            match self.tx_encoder.encode(&tx) {
                Ok(bytes) => txs.push(bytes),
                Err(e) => warn!("skipping transaction that failed to encode: {}", e),
            }
        }

        info!("{} transactions in proposal at height {}", txs.len(), req.height);
        Ok(ResponsePrepareProposal { txs })
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessProposalHandler;

impl ProcessProposalHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn process_proposal(&self, req: &RequestProcessProposal) -> ResponseProcessProposal {
        info!("processing proposal at height {}", req.height);
        for (i, tx) in req.txs.iter().enumerate() {
            info!("transaction {}: {}", i, String::from_utf8_lossy(tx));
        }
        ResponseProcessProposal {
            status: ProposalStatus::Accept,
        }
    }
}
