//! Cargo storage port and its in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{RepositoryError, TrackingId};
use tokio::sync::RwLock;

use crate::cargo::Cargo;

/// Storage port for cargos.
///
/// Each call is atomic on its own; nothing spans calls.
#[async_trait]
pub trait CargoRepository: Send + Sync {
    /// Stores a new cargo.
    async fn store(&self, cargo: &Cargo) -> Result<(), RepositoryError>;

    /// Finds a cargo by tracking ID.
    async fn find(&self, tracking_id: &TrackingId) -> Result<Cargo, RepositoryError>;

    /// Returns every cargo.
    async fn find_all(&self) -> Result<Vec<Cargo>, RepositoryError>;

    /// Replaces an existing cargo. Fails with `NotFound` if it was never stored.
    async fn update(&self, cargo: &Cargo) -> Result<(), RepositoryError>;
}

/// In-memory cargo repository.
#[derive(Clone, Default)]
pub struct InMemoryCargoRepository {
    cargos: Arc<RwLock<HashMap<TrackingId, Cargo>>>,
}

impl InMemoryCargoRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored cargos.
    pub async fn len(&self) -> usize {
        self.cargos.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.cargos.read().await.is_empty()
    }
}

#[async_trait]
impl CargoRepository for InMemoryCargoRepository {
    async fn store(&self, cargo: &Cargo) -> Result<(), RepositoryError> {
        self.cargos
            .write()
            .await
            .insert(cargo.tracking_id(), cargo.clone());
        Ok(())
    }

    async fn find(&self, tracking_id: &TrackingId) -> Result<Cargo, RepositoryError> {
        self.cargos
            .read()
            .await
            .get(tracking_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Cargo", tracking_id))
    }

    async fn find_all(&self) -> Result<Vec<Cargo>, RepositoryError> {
        let mut cargos: Vec<Cargo> = self.cargos.read().await.values().cloned().collect();
        cargos.sort_by_key(Cargo::tracking_id);
        Ok(cargos)
    }

    async fn update(&self, cargo: &Cargo) -> Result<(), RepositoryError> {
        let mut cargos = self.cargos.write().await;
        match cargos.get_mut(&cargo.tracking_id()) {
            Some(existing) => {
                *existing = cargo.clone();
                Ok(())
            }
            None => Err(RepositoryError::not_found("Cargo", cargo.tracking_id())),
        }
    }
}
