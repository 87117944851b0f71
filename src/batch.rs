//! Bounded, insertion-ordered accumulator with run-wide deduplication.
//!
//! The entry list empties on every [`Batch::drain`], but the key set
//! survives, so a business key seen in an earlier chunk of the same run is
//! still suppressed later.

use std::collections::HashSet;
use std::hash::Hash;

/// The uniqueness field(s) an entity is deduplicated by.
pub trait BusinessKey {
    type Key: Eq + Hash;

    fn business_key(&self) -> Self::Key;
}

pub struct Batch<E: BusinessKey> {
    entries: Vec<E>,
    seen: HashSet<E::Key>,
    chunk_size: usize,
}

impl<E: BusinessKey> Batch<E> {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            entries: Vec::with_capacity(chunk_size),
            seen: HashSet::new(),
            chunk_size,
        }
    }

    /// Inserts unless the entity's business key was already seen this run.
    /// First-seen wins; returns whether the entity was kept.
    pub fn push(&mut self, entity: E) -> bool {
        if !self.seen.insert(entity.business_key()) {
            return false;
        }
        self.entries.push(entity);
        true
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.chunk_size
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Hands over the current contents for a bulk insert and resets the
    /// batch to empty. The dedup key set is kept.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.entries)
    }
}

mod keys {
    use super::BusinessKey;
    use crate::domain::{OceanConditions, Port, Vessel, VesselTrajectoryPoint};
    use uuid::Uuid;

    impl BusinessKey for Vessel {
        type Key = u32;

        fn business_key(&self) -> u32 {
            self.mmsi
        }
    }

    impl BusinessKey for VesselTrajectoryPoint {
        type Key = (Uuid, i64);

        fn business_key(&self) -> Self::Key {
            (self.vessel_id, self.timestamp.timestamp())
        }
    }

    impl BusinessKey for OceanConditions {
        // Coordinates keyed by bit pattern; they come straight from the
        // feed, so equal inputs hash equal.
        type Key = (u64, u64, i64);

        fn business_key(&self) -> Self::Key {
            (
                self.geo_point.longitude.to_bits(),
                self.geo_point.latitude.to_bits(),
                self.timestamp.timestamp(),
            )
        }
    }

    impl BusinessKey for Port {
        type Key = (String, String);

        fn business_key(&self) -> Self::Key {
            (self.name.clone(), self.country.clone())
        }
    }
}
