//! flatkv Benchmark Binary
//!
//! Runs the insert/find/erase workload against the standard map and the flat
//! tables, printing latency percentiles per phase.

use std::collections::HashMap;

use clap::{Parser, ValueEnum};
use flatkv::bench::{run_workload, Workload, WorkloadReport};
use flatkv::{BoundedTable, GrowableTable, Key, Order};
use tracing_subscriber::{fmt, EnvFilter};

type Runner = fn(&Workload) -> flatkv::Result<WorkloadReport>;

/// Which stores to measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    Std,
    Bounded,
    Growable,
    All,
}

/// flatkv Benchmark
#[derive(Parser, Debug)]
#[command(name = "flatkv-bench")]
#[command(about = "Latency benchmark for fixed-capacity open-addressing tables")]
#[command(version)]
struct Args {
    /// Number of distinct orders per run
    #[arg(short, long, default_value = "200000")]
    entries: usize,

    /// Seed for key shuffling
    #[arg(short, long, default_value = "1311768467750121217")]
    seed: u64,

    /// Store(s) to benchmark
    #[arg(long, value_enum, default_value = "all")]
    store: StoreKind,

    /// Maximum slots one table operation may visit
    #[arg(short, long, default_value = "128")]
    probe_budget: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,flatkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("flatkv bench v{}", flatkv::VERSION);
    tracing::info!(
        "Entries: {}, seed: {:#x}, probe budget: {}",
        args.entries,
        args.seed,
        args.probe_budget
    );

    let workload = match Workload::new(args.entries, args.seed)
        .and_then(|w| w.with_probe_budget(args.probe_budget))
    {
        Ok(w) => w,
        Err(e) => {
            tracing::error!("Invalid workload: {}", e);
            std::process::exit(1);
        }
    };

    let runs: Vec<Runner> = match args.store {
        StoreKind::Std => vec![run_workload::<HashMap<Key, Order>> as Runner],
        StoreKind::Bounded => vec![run_workload::<BoundedTable<Order>> as Runner],
        StoreKind::Growable => vec![run_workload::<GrowableTable<Order>> as Runner],
        StoreKind::All => vec![
            run_workload::<HashMap<Key, Order>> as Runner,
            run_workload::<BoundedTable<Order>> as Runner,
            run_workload::<GrowableTable<Order>> as Runner,
        ],
    };

    for run in runs {
        match run(&workload) {
            Ok(report) => println!("\n{report}"),
            Err(e) => {
                tracing::error!("Benchmark failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
