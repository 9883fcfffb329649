use std::path::PathBuf;

use anyhow::{bail, ensure, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use most_flights::{
    count, cross_check, CountPipeline, PooledPipeline, RowPolicy, SequentialPipeline, Validation,
};

/// Find the passenger(s) with the most flights in a CSV dataset.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV file of flight records, passenger id in the first field.
    input: PathBuf,

    /// Cross-check the counts against a second CSV file.
    #[arg(long, value_name = "PATH")]
    validate: Option<PathBuf>,

    /// Map-phase worker threads, which is also the target chunk count.
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// Skip rows whose first field is empty or the header sentinel.
    #[arg(long)]
    skip_header: bool,

    /// First-field value that marks a header row.
    #[arg(
        long,
        value_name = "VALUE",
        default_value = RowPolicy::DEFAULT_SENTINEL,
        requires = "skip_header"
    )]
    header_sentinel: String,

    /// Count in a single pass instead of using the worker pool.
    #[arg(long)]
    sequential: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(args.verbose >= 2)
        .init();

    ensure!(args.workers > 0, "--workers must be at least 1");

    let policy = if args.skip_header {
        RowPolicy::SkipHeader {
            sentinel: args.header_sentinel,
        }
    } else {
        RowPolicy::CountAll
    };

    debug!("counting {} under {:?}", args.input.display(), policy);
    let totals = if args.sequential {
        SequentialPipeline::new(args.input, policy.clone()).run().await?
    } else {
        PooledPipeline::new(args.input, policy.clone(), args.workers)
            .run()
            .await?
    };

    match count::top_passengers(&totals) {
        Some((max, top)) => {
            for id in top {
                println!("Passenger {id} has the highest number of flights: {max}");
            }
        }
        None => println!("No passenger data found."),
    }

    if let Some(path) = args.validate {
        match cross_check(&totals, path.clone(), policy, args.workers).await? {
            Validation::Verified => info!("validation passed: {} agrees", path.display()),
            Validation::Skipped => warn!("validation skipped: {} not found", path.display()),
            Validation::Mismatch => {
                bail!("validation failed: counts from {} disagree", path.display())
            }
        }
    }

    Ok(())
}
