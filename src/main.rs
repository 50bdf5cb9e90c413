mod aggregate;
mod models;
mod orchestrator;
mod output;
mod render;
mod similarity;
mod store;
mod tally;

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{debug, info};

use output::OutputWriter;
use store::MetadataStore;

/// Generate publishers index html pages and index
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the puzzles metadata TSV
    #[arg(long, default_value = "gxd/puzzles.tsv")]
    puzzles: String,

    /// Path to the puzzle similarity TSV
    #[arg(long, default_value = "gxd/similar.tsv")]
    similar: String,

    /// Output directory for generated files (default: "www")
    #[arg(short, long, default_value = "www")]
    output_dir: String,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting xdpubs");

    let args = Args::parse();
    debug!(
        "Inputs - puzzles={}, similar={}, output_dir={}",
        args.puzzles, args.similar, args.output_dir
    );

    // Friendlier error if missing
    for path in [&args.puzzles, &args.similar] {
        if !Path::new(path).exists() {
            return Err(anyhow::anyhow!(
                "metadata table not found at {}\n\
                 Use --puzzles / --similar to point at the corpus TSV tables.",
                path
            ));
        }
    }

    let store = MetadataStore::load(Path::new(&args.puzzles), Path::new(&args.similar))?;
    let mut outf = OutputWriter::new(Path::new(&args.output_dir));

    orchestrator::run(&store, &mut outf)
}
