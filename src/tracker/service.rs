//! Async façade over [`ClickStore`].

use std::sync::Arc;

use thiserror::Error;

use super::store::{
    ClickRecord,
    ClickStore,
    StoreError,
};
use crate::types::{
    GameId,
    InvalidGameId,
};

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    InvalidGame(#[from] InvalidGameId),

    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The blocking task panicked or was cancelled.
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Validates raw game ids and runs store calls on the blocking pool.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    store: Arc<ClickStore>,
}

impl ClickTracker {
    #[must_use]
    pub fn new(store: ClickStore) -> Self {
        Self { store: Arc::new(store) }
    }

    /// Count one click for `raw_game`.
    ///
    /// Invalid ids are rejected before storage is touched.
    ///
    /// # Errors
    /// [`TrackerError::InvalidGame`] for unsafe ids; storage errors otherwise.
    pub async fn increment(&self, raw_game: &str) -> Result<ClickRecord, TrackerError> {
        let game = GameId::parse(raw_game).inspect_err(|_| {
            tracing::debug!(raw = %raw_game, "Rejected game id");
        })?;

        let store = Arc::clone(&self.store);
        let record = tokio::task::spawn_blocking(move || store.increment(&game)).await??;
        Ok(record)
    }

    /// Every record, most clicked first.
    ///
    /// # Errors
    /// Storage errors.
    pub async fn list_all(&self) -> Result<Vec<ClickRecord>, TrackerError> {
        let store = Arc::clone(&self.store);
        let records = tokio::task::spawn_blocking(move || store.list_all()).await??;
        Ok(records)
    }
}
