//! Labelport: dataset export engine for labeled image collections.
//!
//! Labelport converts a read-only snapshot of a labeling store (datasets,
//! images, label categories, per-image annotations) into machine-learning
//! interchange formats: a COCO JSON document or a YOLO directory layout
//! packaged as a zip archive.
//!
//! # Modules
//!
//! - [`model`]: Store entities consumed by the engine (Dataset, Image, ...)
//! - [`provider`]: Collaborator contracts (dataset lookup, image payloads)
//! - [`store`]: JSON snapshot store backing the CLI and tests
//! - [`export`]: Dispatcher, category indexing, coordinate transforms, and
//!   the COCO/YOLO exporters
//! - [`error`]: Error types for labelport operations

pub mod error;
pub mod export;
pub mod model;
pub mod provider;
pub mod store;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::ExportError;

use export::{ExportFormat, ExportRequest};
use model::DatasetId;
use provider::Principal;
use store::SnapshotStore;

/// The labelport CLI application.
#[derive(Parser)]
#[command(name = "labelport")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Export a dataset from a store snapshot to an interchange format.
    Export(ExportArgs),
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    /// Store snapshot file (JSON).
    snapshot: PathBuf,

    /// Dataset id to export.
    #[arg(long)]
    dataset: u64,

    /// Username of the requesting principal (must own the dataset's project).
    #[arg(long)]
    owner: String,

    /// Export format ('coco' or 'yolo').
    #[arg(long)]
    format: String,

    /// YOLO only: copy stored image payloads into the archive.
    #[arg(long)]
    include_images: bool,

    /// Directory to write the artifact into (defaults to the current dir).
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

/// Run the labelport CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ExportError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Export(args)) => run_export(args),
        None => {
            println!("labelport {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Dataset export engine for labeled image collections.");
            println!();
            println!("Run 'labelport --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the export subcommand.
fn run_export(args: ExportArgs) -> Result<(), ExportError> {
    let store = SnapshotStore::load(&args.snapshot)?;

    let request = ExportRequest {
        dataset_id: DatasetId::new(args.dataset),
        format: args.format.parse::<ExportFormat>()?,
        include_images: args.include_images,
    };
    let principal = Principal::new(args.owner);

    let artifact = export::export_dataset(&store, &store, &principal, &request)?;

    fs::create_dir_all(&args.out)?;
    let out_path = args.out.join(&artifact.file_name);
    fs::write(&out_path, &artifact.bytes)?;

    println!(
        "Wrote {} ({} bytes, {})",
        out_path.display(),
        artifact.bytes.len(),
        artifact.content_type
    );
    if !artifact.report.is_clean() {
        eprint!("{}", artifact.report);
    }

    Ok(())
}
