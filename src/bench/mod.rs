//! Benchmark Module
//!
//! Measurement scaffolding around the tables.
//!
//! ## Responsibilities
//! - Generate a reproducible key population per run
//! - Drive insert, find and erase through [`KeyedStore`](crate::store::KeyedStore)
//! - Capture per-call wall-clock latency
//! - Summarize into percentiles and throughput

mod stats;
mod workload;

pub use stats::LatencyStats;
pub use workload::{order_at, run_workload, KeyPlan, Workload, WorkloadReport};
