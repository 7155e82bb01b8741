//! Prints the float vectors of a data frame file or a whole dataset.
//!
//! ```text
//! cargo run --example vectors -- --frame data/coil99-3.json chemical_concentrations algae
//! cargo run --example vectors -- --dataset dataset.yaml chemical_concentrations algae
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use framekit::{DataFrame, DataSet, FrameError, StreamConfig, VectorSpec};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Extract float vectors from data frames
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read a single data frame file
    #[arg(long, conflicts_with = "dataset", required_unless_present = "dataset")]
    frame: Option<PathBuf>,

    /// Read every frame listed in a dataset manifest
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Read frames on a background thread
    #[arg(long)]
    prefetch: bool,

    /// Only print the number of vectors
    #[arg(long)]
    count: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Columns to join into each vector, in order
    #[arg(required = true)]
    columns: Vec<String>,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

fn run(args: &Args) -> Result<usize, FrameError> {
    let spec = VectorSpec::float64(args.columns.iter().cloned());
    let config = StreamConfig::default();

    let vectors: Box<dyn Iterator<Item = framekit::Result<Vec<f64>>>> =
        match (&args.frame, &args.dataset) {
            (Some(path), _) => {
                let frame = DataFrame::from_path(path)?;
                info!(rows = frame.row_count(), batch = frame.batch_id(), "loaded frame");
                if args.prefetch {
                    Box::new(frame.prefetch_vectors(spec, &config)?)
                } else {
                    Box::new(frame.into_vectors(spec))
                }
            }
            (None, Some(path)) => {
                let dataset = DataSet::from_path(path)?;
                info!(files = dataset.len(), "loaded dataset");
                if args.prefetch {
                    Box::new(dataset.prefetch_vectors(spec, &config)?)
                } else {
                    Box::new(dataset.into_vectors(spec))
                }
            }
            (None, None) => unreachable!("clap requires --frame or --dataset"),
        };

    let mut count = 0;
    for vector in vectors {
        let vector = vector?;
        if !args.count {
            println!("n: {count:3}, values: {vector:?}");
        }
        count += 1;
    }
    Ok(count)
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    match run(&args) {
        Ok(count) => {
            println!("Total number of instances is {count}.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
