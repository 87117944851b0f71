use crate::domain::{OceanConditions, Port, Vessel, VesselTrajectoryPoint};
use crate::error::Result;
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// In-memory storage implementation for development/testing.
#[derive(Default)]
pub struct InMemoryStorage {
    vessels: Arc<Mutex<HashMap<Uuid, Vessel>>>,
    trajectory_points: Arc<Mutex<HashMap<Uuid, VesselTrajectoryPoint>>>,
    ocean_conditions: Arc<Mutex<HashMap<Uuid, OceanConditions>>>,
    ports: Arc<Mutex<HashMap<Uuid, Port>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vessel_count(&self) -> usize {
        self.vessels.lock().unwrap().len()
    }

    pub fn trajectory_point_count(&self) -> usize {
        self.trajectory_points.lock().unwrap().len()
    }

    pub fn ocean_conditions_count(&self) -> usize {
        self.ocean_conditions.lock().unwrap().len()
    }

    pub fn port_count(&self) -> usize {
        self.ports.lock().unwrap().len()
    }

    pub fn find_vessel_by_mmsi(&self, mmsi: u32) -> Option<Vessel> {
        self.vessels
            .lock()
            .unwrap()
            .values()
            .find(|v| v.mmsi == mmsi)
            .cloned()
    }

    pub fn trajectory_points_for(&self, vessel_id: Uuid) -> Vec<VesselTrajectoryPoint> {
        self.trajectory_points
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.vessel_id == vessel_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn insert_vessels(&self, vessels: Vec<Vessel>) -> Result<()> {
        debug_assert!(!vessels.is_empty());
        let mut map = self.vessels.lock().unwrap();
        for mut vessel in vessels {
            let id = Uuid::new_v4();
            vessel.id = Some(id);
            debug!("stored vessel mmsi {} with id {}", vessel.mmsi, id);
            map.insert(id, vessel);
        }
        Ok(())
    }

    async fn insert_trajectory_points(&self, points: Vec<VesselTrajectoryPoint>) -> Result<()> {
        debug_assert!(!points.is_empty());
        let mut map = self.trajectory_points.lock().unwrap();
        for mut point in points {
            let id = Uuid::new_v4();
            point.id = Some(id);
            map.insert(id, point);
        }
        Ok(())
    }

    async fn insert_ocean_conditions(&self, conditions: Vec<OceanConditions>) -> Result<()> {
        debug_assert!(!conditions.is_empty());
        let mut map = self.ocean_conditions.lock().unwrap();
        for mut measurement in conditions {
            let id = Uuid::new_v4();
            measurement.id = Some(id);
            map.insert(id, measurement);
        }
        Ok(())
    }

    async fn insert_ports(&self, ports: Vec<Port>) -> Result<()> {
        debug_assert!(!ports.is_empty());
        let mut map = self.ports.lock().unwrap();
        for mut port in ports {
            let id = Uuid::new_v4();
            port.id = Some(id);
            debug!("stored port {} with id {}", port.name, id);
            map.insert(id, port);
        }
        Ok(())
    }

    async fn find_vessel_id_by_mmsi(&self, mmsi: u32) -> Result<Option<Uuid>> {
        let vessels = self.vessels.lock().unwrap();
        Ok(vessels
            .values()
            .find(|v| v.mmsi == mmsi)
            .and_then(|v| v.id))
    }
}
