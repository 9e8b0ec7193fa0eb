use thiserror::Error;

#[derive(Error, Debug)]
pub enum SequencerError {
    #[error("Failed to select transactions from mempool: {0}")]
    Mempool(#[source] anyhow::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SequencerError>;
