//! Run-scoped resolution of vessel MMSIs to backing identifiers.

use crate::error::Result;
use crate::storage::Storage;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Caches both successful and negative lookups, so the persistence layer is
/// queried at most once per distinct MMSI per ingestion run. Owned by one
/// run and dropped with it; nothing is invalidated mid-run.
#[derive(Default)]
pub struct VesselResolver {
    cache: HashMap<u32, Option<Uuid>>,
    lookups: u64,
}

impl VesselResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing identifier for `mmsi`, or `None` when no such vessel is
    /// stored. A negative result is a normal outcome, not an error.
    pub async fn resolve(&mut self, storage: &dyn Storage, mmsi: u32) -> Result<Option<Uuid>> {
        if let Some(cached) = self.cache.get(&mmsi) {
            return Ok(*cached);
        }

        self.lookups += 1;
        let resolved = storage.find_vessel_id_by_mmsi(mmsi).await?;
        if resolved.is_none() {
            debug!(mmsi, "no stored vessel for mmsi");
        }
        self.cache.insert(mmsi, resolved);
        Ok(resolved)
    }

    /// Number of lookups actually issued against storage.
    pub fn lookups(&self) -> u64 {
        self.lookups
    }
}
