use anyhow::Result;
use async_trait::async_trait;
use maritime_ingest::domain::{OceanConditions, Port, Vessel, VesselTrajectoryPoint};
use maritime_ingest::error::IngestError;
use maritime_ingest::pipeline::IngestPipeline;
use maritime_ingest::reference;
use maritime_ingest::storage::{InMemoryStorage, Storage};
use std::io::{BufReader, Cursor, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

const STATIC_HEADER: &str =
    "sourcemmsi,imo,callsign,shipname,shiptype,tobow,tostern,tostarboard,toport,eta,draught,destination,mothershipmmsi,t";
const DYNAMIC_HEADER: &str =
    "sourcemmsi,navigationalstatus,rateofturn,speedoverground,courseoverground,trueheading,lon,lat,t";
const OCEAN_HEADER: &str = "lon,lat,bottomdepth,tidaleffect,seaheight,meanwavelength,t";

fn static_line(mmsi: u32, name: &str) -> String {
    format!("{mmsi},9256602,FNMS,{name},70,135,27,11,10,01/06 08:00,7.6,\"Piraeus, Greece\",0,1443650402")
}

fn dynamic_line(mmsi: u32, timestamp: i64) -> String {
    format!("{mmsi},0,0.0,11.9,274.0,272,-4.465,48.3817,{timestamp}")
}

fn feed(header: &str, lines: &[String]) -> Cursor<String> {
    let mut body = String::from(header);
    for line in lines {
        body.push('\n');
        body.push_str(line);
    }
    Cursor::new(body)
}

/// Delegates to [`InMemoryStorage`] while recording bulk-insert sizes and
/// point-lookup counts.
struct RecordingStorage {
    inner: InMemoryStorage,
    insert_sizes: Mutex<Vec<usize>>,
    lookups: AtomicU64,
}

impl RecordingStorage {
    fn new() -> Self {
        Self {
            inner: InMemoryStorage::new(),
            insert_sizes: Mutex::new(Vec::new()),
            lookups: AtomicU64::new(0),
        }
    }

    fn insert_sizes(&self) -> Vec<usize> {
        self.insert_sizes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn insert_vessels(&self, vessels: Vec<Vessel>) -> maritime_ingest::error::Result<()> {
        self.insert_sizes.lock().unwrap().push(vessels.len());
        self.inner.insert_vessels(vessels).await
    }

    async fn insert_trajectory_points(
        &self,
        points: Vec<VesselTrajectoryPoint>,
    ) -> maritime_ingest::error::Result<()> {
        self.insert_sizes.lock().unwrap().push(points.len());
        self.inner.insert_trajectory_points(points).await
    }

    async fn insert_ocean_conditions(
        &self,
        conditions: Vec<OceanConditions>,
    ) -> maritime_ingest::error::Result<()> {
        self.insert_sizes.lock().unwrap().push(conditions.len());
        self.inner.insert_ocean_conditions(conditions).await
    }

    async fn insert_ports(&self, ports: Vec<Port>) -> maritime_ingest::error::Result<()> {
        self.insert_sizes.lock().unwrap().push(ports.len());
        self.inner.insert_ports(ports).await
    }

    async fn find_vessel_id_by_mmsi(
        &self,
        mmsi: u32,
    ) -> maritime_ingest::error::Result<Option<Uuid>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_vessel_id_by_mmsi(mmsi).await
    }
}

/// Always fails bulk inserts; used to assert fatal propagation.
struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn insert_vessels(&self, _vessels: Vec<Vessel>) -> maritime_ingest::error::Result<()> {
        Err(IngestError::Persistence("store unavailable".to_string()))
    }

    async fn insert_trajectory_points(
        &self,
        _points: Vec<VesselTrajectoryPoint>,
    ) -> maritime_ingest::error::Result<()> {
        Err(IngestError::Persistence("store unavailable".to_string()))
    }

    async fn insert_ocean_conditions(
        &self,
        _conditions: Vec<OceanConditions>,
    ) -> maritime_ingest::error::Result<()> {
        Err(IngestError::Persistence("store unavailable".to_string()))
    }

    async fn insert_ports(&self, _ports: Vec<Port>) -> maritime_ingest::error::Result<()> {
        Err(IngestError::Persistence("store unavailable".to_string()))
    }

    async fn find_vessel_id_by_mmsi(
        &self,
        _mmsi: u32,
    ) -> maritime_ingest::error::Result<Option<Uuid>> {
        Ok(None)
    }
}

#[tokio::test]
async fn vessel_feed_end_to_end() -> Result<()> {
    reference::init()?;

    // Header + 5 lines: one malformed (blank mandatory mmsi), one duplicate.
    let lines = vec![
        static_line(228157000, "MARFRET MARSEILLE"),
        static_line(239923000, "BLUE STAR PATMOS"),
        " ,9256602,FNMS,BROKEN,70,135,27,11,10,01/06 08:00,7.6,VALENCIA,0,1443650402".to_string(),
        static_line(228157000, "MARFRET MARSEILLE"),
        static_line(538005989, "MAERSK AVON"),
    ];
    let storage = RecordingStorage::new();
    let report = IngestPipeline::new()
        .ingest_vessels(feed(STATIC_HEADER, &lines), &storage)
        .await?;

    assert_eq!(report.lines_read, 5);
    assert_eq!(report.inserted, 3);
    assert_eq!(report.discarded, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(storage.inner.vessel_count(), 3);

    // Auxiliary data resolved from the reference tables during mapping.
    let vessel = storage.inner.find_vessel_by_mmsi(228157000).unwrap();
    assert_eq!(vessel.country.as_deref(), Some("France"));
    assert_eq!(vessel.ship_type.as_deref(), Some("Cargo"));
    assert_eq!(vessel.destination.as_deref(), Some("Piraeus, Greece"));
    Ok(())
}

#[tokio::test]
async fn flushes_in_chunks_of_configured_size() -> Result<()> {
    reference::init()?;

    // M = 5 distinct vessels, C = 2: expect ceil(5/2) = 3 inserts of 2, 2, 1.
    let lines: Vec<String> = (0..5)
        .map(|i| static_line(228157000 + i, "SOME VESSEL"))
        .collect();
    let storage = RecordingStorage::new();
    let pipeline = IngestPipeline::with_chunk_size(2)?;
    let report = pipeline
        .ingest_vessels(feed(STATIC_HEADER, &lines), &storage)
        .await?;

    assert_eq!(report.inserted, 5);
    assert_eq!(report.flushes, 3);
    assert_eq!(storage.insert_sizes(), vec![2, 2, 1]);
    Ok(())
}

#[tokio::test]
async fn evenly_divisible_feed_has_no_short_chunk() -> Result<()> {
    reference::init()?;

    let lines: Vec<String> = (0..4)
        .map(|i| static_line(228157000 + i, "SOME VESSEL"))
        .collect();
    let storage = RecordingStorage::new();
    let pipeline = IngestPipeline::with_chunk_size(2)?;
    pipeline
        .ingest_vessels(feed(STATIC_HEADER, &lines), &storage)
        .await?;

    assert_eq!(storage.insert_sizes(), vec![2, 2]);
    Ok(())
}

#[tokio::test]
async fn repeated_mmsi_costs_one_lookup() -> Result<()> {
    reference::init()?;

    let storage = RecordingStorage::new();
    let pipeline = IngestPipeline::new();
    pipeline
        .ingest_vessels(
            feed(STATIC_HEADER, &[static_line(228157000, "MARFRET MARSEILLE")]),
            &storage,
        )
        .await?;

    let lines: Vec<String> = (0..10)
        .map(|i| dynamic_line(228157000, 1443650402 + i))
        .collect();
    let report = pipeline
        .ingest_trajectory_points(feed(DYNAMIC_HEADER, &lines), &storage)
        .await?;

    assert_eq!(report.inserted, 10);
    assert_eq!(storage.lookups.load(Ordering::SeqCst), 1);

    // Points reference the vessel's backing identifier, not its MMSI.
    let vessel_id = storage.inner.find_vessel_by_mmsi(228157000).unwrap().id.unwrap();
    assert_eq!(storage.inner.trajectory_points_for(vessel_id).len(), 10);
    Ok(())
}

#[tokio::test]
async fn unresolved_mmsi_drops_the_line_without_error() -> Result<()> {
    reference::init()?;

    let storage = RecordingStorage::new();
    let lines: Vec<String> = (0..3)
        .map(|i| dynamic_line(999000111, 1443650402 + i))
        .collect();
    let report = IngestPipeline::new()
        .ingest_trajectory_points(feed(DYNAMIC_HEADER, &lines), &storage)
        .await?;

    assert_eq!(report.inserted, 0);
    assert_eq!(report.unresolved, 3);
    assert_eq!(storage.inner.trajectory_point_count(), 0);
    // Negative result memoized after the first miss.
    assert_eq!(storage.lookups.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn out_of_range_position_is_discarded() -> Result<()> {
    reference::init()?;

    let storage = RecordingStorage::new();
    let pipeline = IngestPipeline::new();
    pipeline
        .ingest_vessels(
            feed(STATIC_HEADER, &[static_line(228157000, "MARFRET MARSEILLE")]),
            &storage,
        )
        .await?;

    let bad = "228157000,0,0.0,11.9,274.0,272,-200.0,48.3817,1443650402".to_string();
    let report = pipeline
        .ingest_trajectory_points(feed(DYNAMIC_HEADER, &[bad]), &storage)
        .await?;

    assert_eq!(report.inserted, 0);
    assert_eq!(report.discarded, 1);
    Ok(())
}

#[tokio::test]
async fn ocean_conditions_deduplicate_by_position_and_time() -> Result<()> {
    let storage = RecordingStorage::new();
    let lines = vec![
        "-4.465,48.3817,-120.5,0.12,1.4,87,1443650402".to_string(),
        // Missing measurements fall back to the documented sentinels.
        "-4.465,48.4000,,,,,1443650403".to_string(),
        // Duplicate of the first point and time.
        "-4.465,48.3817,-120.5,0.12,1.4,87,1443650402".to_string(),
    ];
    let report = IngestPipeline::new()
        .ingest_ocean_conditions(feed(OCEAN_HEADER, &lines), &storage)
        .await?;

    assert_eq!(report.inserted, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(storage.inner.ocean_conditions_count(), 2);
    Ok(())
}

#[tokio::test]
async fn persistence_failure_aborts_the_run() -> Result<()> {
    reference::init()?;

    let lines: Vec<String> = (0..3)
        .map(|i| static_line(228157000 + i, "SOME VESSEL"))
        .collect();
    let pipeline = IngestPipeline::with_chunk_size(2)?;
    let err = pipeline
        .ingest_vessels(feed(STATIC_HEADER, &lines), &FailingStorage)
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Persistence(_)));
    assert!(!err.is_recoverable());
    Ok(())
}

#[tokio::test]
async fn zero_chunk_size_is_rejected() {
    assert!(matches!(
        IngestPipeline::with_chunk_size(0),
        Err(IngestError::Config(_))
    ));
}

#[tokio::test]
async fn reads_a_feed_from_disk() -> Result<()> {
    reference::init()?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nari_static_sample.csv");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "{STATIC_HEADER}")?;
    writeln!(file, "{}", static_line(228157000, "MARFRET MARSEILLE"))?;
    writeln!(file, "{}", static_line(239923000, "BLUE STAR PATMOS"))?;

    let storage = RecordingStorage::new();
    let report = IngestPipeline::new()
        .ingest_vessels(BufReader::new(std::fs::File::open(&path)?), &storage)
        .await?;

    assert_eq!(report.inserted, 2);
    Ok(())
}

#[tokio::test]
async fn ports_bulk_insert_round_trips() -> Result<()> {
    use maritime_ingest::domain::GeoPoint;

    let storage = InMemoryStorage::new();
    let ports = vec![
        Port::new(
            "Piraeus".to_string(),
            "Greece".to_string(),
            GeoPoint::new(23.6174, 37.9421)?,
        ),
        Port::new(
            "Marseille".to_string(),
            "France".to_string(),
            GeoPoint::new(5.3522, 43.3148)?,
        ),
    ];
    storage.insert_ports(ports).await?;
    assert_eq!(storage.port_count(), 2);
    Ok(())
}
