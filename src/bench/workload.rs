//! Workload generation and timed execution

use std::fmt;
use std::hint::black_box;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::stats::LatencyStats;
use crate::config::DEFAULT_PROBE_BUDGET;
use crate::error::{FlatError, Result};
use crate::order::{Order, Side};
use crate::store::KeyedStore;
use crate::table::{Key, MIN_KEY};

/// Mixed into the seed for the lookup order
const FIND_SEED_SALT: u64 = 0xAB_CDEF;

/// Size, seed and probe budget of a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workload {
    pub entries: usize,
    pub seed: u64,

    /// Probe budget handed to the flat tables
    pub probe_budget: usize,
}

/// Keys for each phase of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPlan {
    /// Every key, in insertion order
    pub inserts: Vec<Key>,

    /// Every key again, reshuffled
    pub finds: Vec<Key>,

    /// First half of `finds`
    pub erases: Vec<Key>,
}

impl Workload {
    pub fn new(entries: usize, seed: u64) -> Result<Self> {
        if entries == 0 {
            return Err(FlatError::Config("workload needs at least one entry".into()));
        }
        Ok(Self {
            entries,
            seed,
            probe_budget: DEFAULT_PROBE_BUDGET,
        })
    }

    /// Same workload with a different probe budget
    pub fn with_probe_budget(mut self, probe_budget: usize) -> Result<Self> {
        if probe_budget == 0 {
            return Err(FlatError::Config("probe budget must be positive".into()));
        }
        self.probe_budget = probe_budget;
        Ok(self)
    }

    /// Distinct keys `MIN_KEY..MIN_KEY + entries`, shuffled per phase
    pub fn plan(&self) -> KeyPlan {
        let mut inserts: Vec<Key> = (MIN_KEY..MIN_KEY + self.entries as Key).collect();
        inserts.shuffle(&mut ChaCha8Rng::seed_from_u64(self.seed));

        let mut finds = inserts.clone();
        finds.shuffle(&mut ChaCha8Rng::seed_from_u64(self.seed ^ FIND_SEED_SALT));

        let erases = finds[..self.entries / 2].to_vec();

        KeyPlan {
            inserts,
            finds,
            erases,
        }
    }
}

/// The order inserted at position `i` of a run
pub fn order_at(i: usize, key: Key) -> Order {
    let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
    Order::new(key, 100.0 + (i % 50) as f64, side, 10 + (i % 100) as u32)
}

/// Measured outcome of one run against one store
#[derive(Debug, Clone)]
pub struct WorkloadReport {
    pub label: &'static str,
    pub insert: Option<LatencyStats>,
    pub find: Option<LatencyStats>,
    pub erase: Option<LatencyStats>,

    /// Inserts the store refused
    pub rejected_inserts: usize,

    /// Lookups that found nothing
    pub find_misses: usize,

    /// Erases that removed nothing
    pub failed_erases: usize,

    /// Live entries once every phase finished
    pub live_after: usize,
}

/// Run the insert, find and erase phases of `workload` against a fresh `S`
pub fn run_workload<S: KeyedStore>(workload: &Workload) -> Result<WorkloadReport> {
    let plan = workload.plan();
    let mut store = S::with_expected(workload.entries, workload.probe_budget)?;

    tracing::debug!(
        store = S::NAME,
        entries = workload.entries,
        seed = workload.seed,
        probe_budget = workload.probe_budget,
        "starting workload"
    );

    // Insert
    let mut samples = Vec::with_capacity(plan.inserts.len());
    let mut rejected_inserts = 0;
    let phase = Instant::now();
    for (i, &key) in plan.inserts.iter().enumerate() {
        let order = order_at(i, key);
        let t0 = Instant::now();
        let stored = store.store(key, order)?;
        samples.push(t0.elapsed().as_nanos() as u64);
        if !stored {
            rejected_inserts += 1;
        }
    }
    let insert = LatencyStats::from_samples(&samples, phase.elapsed());

    // Find
    samples.clear();
    let mut find_misses = 0;
    let phase = Instant::now();
    for &key in &plan.finds {
        let t0 = Instant::now();
        let qty = black_box(store.lookup(key)).map(|order| order.qty);
        samples.push(t0.elapsed().as_nanos() as u64);
        if black_box(qty).is_none() {
            find_misses += 1;
        }
    }
    let find = LatencyStats::from_samples(&samples, phase.elapsed());

    // Erase
    samples.clear();
    let mut failed_erases = 0;
    let phase = Instant::now();
    for &key in &plan.erases {
        let t0 = Instant::now();
        let removed = store.remove(key);
        samples.push(t0.elapsed().as_nanos() as u64);
        if !removed {
            failed_erases += 1;
        }
    }
    let erase = LatencyStats::from_samples(&samples, phase.elapsed());

    if rejected_inserts > 0 {
        tracing::warn!(store = S::NAME, rejected_inserts, "store refused inserts under load");
    }

    Ok(WorkloadReport {
        label: S::NAME,
        insert,
        find,
        erase,
        rejected_inserts,
        find_misses,
        failed_erases,
        live_after: store.live(),
    })
}

impl fmt::Display for WorkloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Benchmark for: {} ===", self.label)?;

        let phases = [
            ("insert (Order)", &self.insert),
            ("find (Order)", &self.find),
            ("erase (Order, N/2)", &self.erase),
        ];
        for (name, stats) in phases {
            if let Some(stats) = stats {
                writeln!(f, "{name}:")?;
                writeln!(f, "{stats}")?;
            }
        }

        write!(
            f,
            "  Rejected inserts: {}, find misses: {}, failed erases: {}, live after: {}",
            self.rejected_inserts, self.find_misses, self.failed_erases, self.live_after
        )
    }
}
