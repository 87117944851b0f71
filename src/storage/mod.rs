//! Persistence collaborator contract.

mod in_memory;

pub use in_memory::InMemoryStorage;

use crate::domain::{OceanConditions, Port, Vessel, VesselTrajectoryPoint};
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// A document store accepting bulk inserts and point lookups.
///
/// Bulk inserts take an ordered, non-empty batch of one entity type and
/// either fully succeed or fail as a unit; there is no partial-success
/// reporting. The pipeline never retries a failed insert within a run.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn insert_vessels(&self, vessels: Vec<Vessel>) -> Result<()>;

    async fn insert_trajectory_points(&self, points: Vec<VesselTrajectoryPoint>) -> Result<()>;

    async fn insert_ocean_conditions(&self, conditions: Vec<OceanConditions>) -> Result<()>;

    async fn insert_ports(&self, ports: Vec<Port>) -> Result<()>;

    /// Backing identifier of the vessel with the given MMSI, if stored.
    async fn find_vessel_id_by_mmsi(&self, mmsi: u32) -> Result<Option<Uuid>>;
}
