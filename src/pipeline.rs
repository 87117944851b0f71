//! Streaming ingestion runs: one driver per feed type.
//!
//! A run owns its batch accumulator (and, for trajectory points, its vessel
//! resolver) and discards both on completion. Per-line failures are counted
//! and logged at debug level but never abort the run; stream I/O errors and
//! persistence failures do.

use crate::batch::Batch;
use crate::constants::DEFAULT_CHUNK_SIZE;
use crate::error::{IngestError, Result};
use crate::parser::LineDecoder;
use crate::resolver::VesselResolver;
use crate::storage::Storage;
use crate::{extract, reference};
use metrics::{counter, histogram};
use serde::Serialize;
use std::io::BufRead;
use std::time::Instant;
use tracing::{debug, info};

/// Totals of one completed ingestion run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct IngestReport {
    /// Data lines read (the header is not counted).
    pub lines_read: usize,
    /// Entities committed to storage.
    pub inserted: usize,
    /// Lines discarded because decoding or entity construction failed.
    pub discarded: usize,
    /// Lines suppressed because their business key was already seen.
    pub duplicates: usize,
    /// Trajectory lines dropped because no stored vessel matched the MMSI.
    pub unresolved: usize,
    /// Bulk inserts issued.
    pub flushes: usize,
}

pub struct IngestPipeline {
    chunk_size: usize,
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl IngestPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_size(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(IngestError::Config(
                "chunk size must be a positive integer".to_string(),
            ));
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Ingests a static vessel feed. Ship-type and country names are
    /// resolved from the reference tables while mapping each record.
    pub async fn ingest_vessels<R: BufRead>(
        &self,
        reader: R,
        storage: &dyn Storage,
    ) -> Result<IngestReport> {
        let started = Instant::now();
        info!(chunk_size = self.chunk_size, "vessel ingestion started");
        counter!("maritime_ingest_runs_total", "feed" => "vessels").increment(1);

        let decoder = LineDecoder;
        let mut batch = Batch::new(self.chunk_size);
        let mut report = IngestReport::default();
        let mut header_seen = false;

        for line in reader.lines() {
            let line = line?;
            if !header_seen {
                header_seen = true;
                continue;
            }
            report.lines_read += 1;

            let record = match decoder.static_vessel(&line) {
                Ok(record) => record,
                Err(e) => {
                    report.discarded += 1;
                    debug!(error = %e, "discarding corrupted line");
                    continue;
                }
            };

            let ship_type = reference::ship_type_name(record.ship_type).map(str::to_string);
            let country = reference::country_by_mmsi(record.mmsi).map(str::to_string);
            let vessel = extract::vessel(record, ship_type, country);

            if !batch.push(vessel) {
                report.duplicates += 1;
                continue;
            }
            if batch.is_full() {
                flush(&mut batch, &mut report, |chunk| {
                    storage.insert_vessels(chunk)
                })
                .await?;
            }
        }
        flush(&mut batch, &mut report, |chunk| {
            storage.insert_vessels(chunk)
        })
        .await?;

        self.finish("vessels", &report, started);
        Ok(report)
    }

    /// Ingests a dynamic position feed. Each line must resolve to a stored
    /// vessel; lines whose MMSI resolves to nothing are dropped.
    pub async fn ingest_trajectory_points<R: BufRead>(
        &self,
        reader: R,
        storage: &dyn Storage,
    ) -> Result<IngestReport> {
        let started = Instant::now();
        info!(chunk_size = self.chunk_size, "trajectory ingestion started");
        counter!("maritime_ingest_runs_total", "feed" => "trajectories").increment(1);

        let decoder = LineDecoder;
        let mut batch = Batch::new(self.chunk_size);
        let mut resolver = VesselResolver::new();
        let mut report = IngestReport::default();
        let mut header_seen = false;

        for line in reader.lines() {
            let line = line?;
            if !header_seen {
                header_seen = true;
                continue;
            }
            report.lines_read += 1;

            let record = match decoder.dynamic_position(&line) {
                Ok(record) => record,
                Err(e) => {
                    report.discarded += 1;
                    debug!(error = %e, "discarding corrupted line");
                    continue;
                }
            };

            let vessel_id = match resolver.resolve(storage, record.mmsi).await? {
                Some(id) => id,
                None => {
                    report.unresolved += 1;
                    continue;
                }
            };

            let point = match extract::trajectory_point(&record, vessel_id) {
                Ok(point) => point,
                Err(e) if e.is_recoverable() => {
                    report.discarded += 1;
                    debug!(error = %e, "discarding unmappable line");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !batch.push(point) {
                report.duplicates += 1;
                continue;
            }
            if batch.is_full() {
                flush(&mut batch, &mut report, |chunk| {
                    storage.insert_trajectory_points(chunk)
                })
                .await?;
            }
        }
        flush(&mut batch, &mut report, |chunk| {
            storage.insert_trajectory_points(chunk)
        })
        .await?;

        debug!(lookups = resolver.lookups(), "resolver cache released");
        self.finish("trajectories", &report, started);
        Ok(report)
    }

    /// Ingests an ocean conditions feed.
    pub async fn ingest_ocean_conditions<R: BufRead>(
        &self,
        reader: R,
        storage: &dyn Storage,
    ) -> Result<IngestReport> {
        let started = Instant::now();
        info!(chunk_size = self.chunk_size, "ocean conditions ingestion started");
        counter!("maritime_ingest_runs_total", "feed" => "ocean_conditions").increment(1);

        let decoder = LineDecoder;
        let mut batch = Batch::new(self.chunk_size);
        let mut report = IngestReport::default();
        let mut header_seen = false;

        for line in reader.lines() {
            let line = line?;
            if !header_seen {
                header_seen = true;
                continue;
            }
            report.lines_read += 1;

            let record = match decoder.ocean_condition(&line) {
                Ok(record) => record,
                Err(e) => {
                    report.discarded += 1;
                    debug!(error = %e, "discarding corrupted line");
                    continue;
                }
            };

            let measurement = match extract::ocean_conditions(&record) {
                Ok(measurement) => measurement,
                Err(e) if e.is_recoverable() => {
                    report.discarded += 1;
                    debug!(error = %e, "discarding unmappable line");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !batch.push(measurement) {
                report.duplicates += 1;
                continue;
            }
            if batch.is_full() {
                flush(&mut batch, &mut report, |chunk| {
                    storage.insert_ocean_conditions(chunk)
                })
                .await?;
            }
        }
        flush(&mut batch, &mut report, |chunk| {
            storage.insert_ocean_conditions(chunk)
        })
        .await?;

        self.finish("ocean_conditions", &report, started);
        Ok(report)
    }

    fn finish(&self, feed: &'static str, report: &IngestReport, started: Instant) {
        let elapsed = started.elapsed().as_secs_f64();
        counter!("maritime_entities_inserted_total", "feed" => feed)
            .increment(report.inserted as u64);
        counter!("maritime_lines_discarded_total", "feed" => feed)
            .increment(report.discarded as u64);
        counter!("maritime_duplicates_total", "feed" => feed)
            .increment(report.duplicates as u64);
        histogram!("maritime_ingest_duration_seconds", "feed" => feed).record(elapsed);

        info!(
            feed,
            lines_read = report.lines_read,
            inserted = report.inserted,
            discarded = report.discarded,
            duplicates = report.duplicates,
            unresolved = report.unresolved,
            flushes = report.flushes,
            "ingestion finished"
        );
    }
}

/// Commits the current batch contents, if any. An empty flush is a no-op.
async fn flush<E, F, Fut>(
    batch: &mut Batch<E>,
    report: &mut IngestReport,
    bulk_insert: F,
) -> Result<()>
where
    E: crate::batch::BusinessKey,
    F: FnOnce(Vec<E>) -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    if batch.is_empty() {
        return Ok(());
    }
    let chunk = batch.drain();
    let committed = chunk.len();
    bulk_insert(chunk).await?;
    report.inserted += committed;
    report.flushes += 1;
    debug!(committed, "chunk committed");
    Ok(())
}
