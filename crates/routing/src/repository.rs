//! Storage ports for voyages and locations, with in-memory implementations.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{RepositoryError, UnLocode, VoyageNumber};
use tokio::sync::RwLock;

use crate::{Location, Voyage};

/// Storage port for voyages.
#[async_trait]
pub trait VoyageRepository: Send + Sync {
    /// Stores a voyage, replacing any voyage with the same number.
    async fn store(&self, voyage: Voyage) -> Result<(), RepositoryError>;

    /// Finds a voyage by number.
    async fn find(&self, number: &VoyageNumber) -> Result<Voyage, RepositoryError>;

    /// Returns every voyage, ordered by number.
    async fn find_all(&self) -> Result<Vec<Voyage>, RepositoryError>;
}

/// Storage port for locations.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Stores a location, replacing any location with the same code.
    async fn store(&self, location: Location) -> Result<(), RepositoryError>;

    /// Finds a location by code.
    async fn find(&self, code: &UnLocode) -> Result<Location, RepositoryError>;

    /// Returns every location, ordered by code.
    async fn find_all(&self) -> Result<Vec<Location>, RepositoryError>;
}

/// In-memory voyage repository.
#[derive(Clone, Default)]
pub struct InMemoryVoyageRepository {
    voyages: Arc<RwLock<BTreeMap<VoyageNumber, Voyage>>>,
}

impl InMemoryVoyageRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoyageRepository for InMemoryVoyageRepository {
    async fn store(&self, voyage: Voyage) -> Result<(), RepositoryError> {
        self.voyages
            .write()
            .await
            .insert(voyage.number().clone(), voyage);
        Ok(())
    }

    async fn find(&self, number: &VoyageNumber) -> Result<Voyage, RepositoryError> {
        self.voyages
            .read()
            .await
            .get(number)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Voyage", number))
    }

    async fn find_all(&self) -> Result<Vec<Voyage>, RepositoryError> {
        Ok(self.voyages.read().await.values().cloned().collect())
    }
}

/// In-memory location repository.
#[derive(Clone, Default)]
pub struct InMemoryLocationRepository {
    locations: Arc<RwLock<BTreeMap<UnLocode, Location>>>,
}

impl InMemoryLocationRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn store(&self, location: Location) -> Result<(), RepositoryError> {
        self.locations
            .write()
            .await
            .insert(location.code().clone(), location);
        Ok(())
    }

    async fn find(&self, code: &UnLocode) -> Result<Location, RepositoryError> {
        self.locations
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Location", code))
    }

    async fn find_all(&self) -> Result<Vec<Location>, RepositoryError> {
        Ok(self.locations.read().await.values().cloned().collect())
    }
}
