//! Latency statistics

use std::fmt;
use std::time::Duration;

/// Percentile summary of one measured phase
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyStats {
    /// Number of timed calls
    pub samples: usize,
    pub p50_ns: u64,
    pub p95_ns: u64,
    pub p99_ns: u64,
    pub mean_ns: f64,
    /// Million operations per second over the whole phase
    pub mops: f64,
}

impl LatencyStats {
    /// Summarize per-call latencies measured over `total` wall time
    ///
    /// Returns `None` for an empty phase.
    pub fn from_samples(samples_ns: &[u64], total: Duration) -> Option<Self> {
        if samples_ns.is_empty() {
            return None;
        }

        let n = samples_ns.len();
        let mut scratch = samples_ns.to_vec();
        let mut nth = |q: f64| {
            let idx = (q * (n - 1) as f64) as usize;
            *scratch.select_nth_unstable(idx).1
        };

        let p50_ns = nth(0.50);
        let p95_ns = nth(0.95);
        let p99_ns = nth(0.99);

        let mean_ns = samples_ns.iter().map(|&s| s as f64).sum::<f64>() / n as f64;
        let total_ns = total.as_nanos().max(1) as f64;
        let mops = n as f64 * 1e3 / total_ns;

        Some(Self {
            samples: n,
            p50_ns,
            p95_ns,
            p99_ns,
            mean_ns,
            mops,
        })
    }
}

impl fmt::Display for LatencyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Throughput: {:.2} Mops/s", self.mops)?;
        write!(
            f,
            "  Latency ns: 50th Percentile={}, 95th Percentile={}, 99th Percentile={}, Avg={:.2}",
            self.p50_ns, self.p95_ns, self.p99_ns, self.mean_ns
        )
    }
}
