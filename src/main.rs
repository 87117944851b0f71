use clap::{Args, Parser, Subcommand};
use maritime_ingest::constants::DEFAULT_CHUNK_SIZE;
use maritime_ingest::logging::init_logging;
use maritime_ingest::pipeline::{IngestPipeline, IngestReport};
use maritime_ingest::reference;
use maritime_ingest::storage::InMemoryStorage;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "maritime_ingest")]
#[command(about = "AIS vessel-tracking and ocean-condition feed ingester")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a static vessel feed
    Vessels(FeedArgs),
    /// Ingest a dynamic position feed (requires previously ingested vessels)
    Trajectories(FeedArgs),
    /// Ingest an ocean conditions feed
    OceanConditions(FeedArgs),
    /// Ingest a vessel feed, then a position feed, against the same store
    Run {
        /// Path to the static vessel CSV
        #[arg(long)]
        vessels: PathBuf,
        /// Path to the dynamic position CSV
        #[arg(long)]
        trajectories: PathBuf,
        /// Entities per bulk insert
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
        /// Print run reports as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct FeedArgs {
    /// Path to the CSV feed
    #[arg(long)]
    input: PathBuf,
    /// Entities per bulk insert
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn open_feed(path: &Path) -> std::io::Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

fn print_report(label: &str, report: &IngestReport, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("\n📊 Ingest report ({label}):");
    println!("   Lines read: {}", report.lines_read);
    println!("   Inserted:   {}", report.inserted);
    println!("   Discarded:  {}", report.discarded);
    println!("   Duplicates: {}", report.duplicates);
    println!("   Unresolved: {}", report.unresolved);
    println!("   Flushes:    {}", report.flushes);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Reference tables are fatal at startup if they fail to load.
    reference::init()?;

    let cli = Cli::parse();
    // The in-memory store keeps runs self-contained; a document-store
    // backed implementation plugs in behind the same trait.
    let storage = InMemoryStorage::new();

    match cli.command {
        Commands::Vessels(args) => {
            let pipeline = IngestPipeline::with_chunk_size(args.chunk_size)?;
            let report = pipeline
                .ingest_vessels(open_feed(&args.input)?, &storage)
                .await?;
            print_report("vessels", &report, args.json)?;
        }
        Commands::Trajectories(args) => {
            let pipeline = IngestPipeline::with_chunk_size(args.chunk_size)?;
            let report = pipeline
                .ingest_trajectory_points(open_feed(&args.input)?, &storage)
                .await?;
            print_report("trajectories", &report, args.json)?;
        }
        Commands::OceanConditions(args) => {
            let pipeline = IngestPipeline::with_chunk_size(args.chunk_size)?;
            let report = pipeline
                .ingest_ocean_conditions(open_feed(&args.input)?, &storage)
                .await?;
            print_report("ocean conditions", &report, args.json)?;
        }
        Commands::Run {
            vessels,
            trajectories,
            chunk_size,
            json,
        } => {
            let pipeline = IngestPipeline::with_chunk_size(chunk_size)?;
            let vessel_report = pipeline
                .ingest_vessels(open_feed(&vessels)?, &storage)
                .await?;
            print_report("vessels", &vessel_report, json)?;
            info!("vessel feed done, ingesting positions");
            let point_report = pipeline
                .ingest_trajectory_points(open_feed(&trajectories)?, &storage)
                .await?;
            print_report("trajectories", &point_report, json)?;
        }
    }

    Ok(())
}
