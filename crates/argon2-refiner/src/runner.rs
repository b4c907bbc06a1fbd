//! The parameter-search engine.

use tracing::{debug, info};

use crate::config::RecommenderConfig;
use crate::decision::Decision;
use crate::probe::{BackendProbe, CostProbe};
use crate::result::{rank, Recommendation};

/// Memory costs are only ever probed at 8192-byte granularity; the low bits
/// of every candidate are masked off between probes.
const MEMORY_STEP_MASK: u64 = !0x1FFF;

/// Smallest memory span still worth bisecting, in bytes.
const MIN_SPAN: u64 = 1024;

/// Executes the parameter search described by a [`RecommenderConfig`].
///
/// Time costs are scanned linearly from the configured minimum to the
/// configured maximum. For each time cost the memory-cost axis is walked
/// with a bounded bisection: the span between the memory bounds is halved
/// before every adjustment, and the candidate moves up or down by the halved
/// span depending on whether the measurement came in under or over the
/// tolerance window. A measurement inside the window is recorded and the
/// walk still continues upward, so the search is biased toward the largest
/// memory cost that fits: among latency-equivalent candidates, more memory
/// is the more conservative recommendation.
///
/// This is not a first-success binary search. One time cost can contribute
/// zero, one, or several samples, and a time cost with no in-range sample
/// simply contributes nothing.
///
/// The engine is synchronous and single-threaded; every probe blocks for the
/// full duration of one hashing operation.
///
/// # Example
///
/// ```
/// use argon2_refiner::{Recommender, RecommenderConfig};
///
/// // A synthetic latency model stands in for real hashing here.
/// let config = RecommenderConfig::new(500);
/// let recommender = Recommender::with_probe(
///     config,
///     |time_cost: u32, memory_bytes: u64, _probe_value: &[u8]| {
///         u64::from(time_cost) * (memory_bytes >> 21)
///     },
/// );
/// let recommendations = recommender.run();
/// assert!(recommendations.iter().all(|r| r.memory_cost % 8192 == 0));
/// ```
pub struct Recommender<P = BackendProbe> {
    config: RecommenderConfig,
    probe: P,
}

impl Recommender<BackendProbe> {
    /// Creates a recommender that measures with the configured hashing
    /// backend.
    ///
    /// The configuration is moved in and frozen for the lifetime of the
    /// recommender; the backend selector itself is re-resolved on every
    /// probe call.
    pub fn new(config: RecommenderConfig) -> Self {
        let probe = BackendProbe::new(config.backend());
        Self { config, probe }
    }
}

impl<P: CostProbe> Recommender<P> {
    /// Creates a recommender that measures with a caller-supplied probe.
    pub fn with_probe(config: RecommenderConfig, probe: P) -> Self {
        Self { config, probe }
    }

    /// Runs the search and returns the in-range samples, slowest first.
    ///
    /// Every returned sample has a memory cost that is a multiple of 8192
    /// and a measured latency the configuration classifies as in range. An
    /// empty result is a valid outcome, not an error. The probe count is
    /// bounded: the memory span halves on every probe, so each time cost
    /// costs `O(log2(memory range))` measurements and the search always
    /// terminates.
    pub fn run(&self) -> Vec<Recommendation> {
        let config = &self.config;
        info!(
            event = "search_start",
            backend = %config.backend(),
            target_ms = config.target_ms(),
            min_memory = config.min_memory(),
            max_memory = config.max_memory(),
            min_time = config.min_time(),
            max_time = config.max_time(),
        );

        let probe_value = config.probe_value().as_bytes();
        let mut found = Vec::new();
        for time_cost in config.min_time()..=config.max_time() {
            let mut memory = config.min_memory();
            let mut span = config.max_memory().saturating_sub(config.min_memory());
            while span >= MIN_SPAN {
                let measured_ms = self.probe.measure(time_cost, memory, probe_value);
                let decision = config.decide(measured_ms);
                debug!(
                    event = "probe",
                    time_cost,
                    memory_cost = memory,
                    measured_ms,
                    decision = %decision,
                );

                // Halve the step before applying it.
                span >>= 1;
                match decision {
                    Decision::TooFast => memory += span,
                    Decision::TooSlow => memory = memory.saturating_sub(span),
                    Decision::InRange => {
                        found.push(Recommendation {
                            memory_cost: memory,
                            time_cost,
                            measured_ms,
                        });
                        // Keep walking upward past the hit: a pricier memory
                        // cost inside the window is the more conservative
                        // recommendation.
                        memory += span;
                    }
                }
                memory &= MEMORY_STEP_MASK;
            }
        }

        rank(&mut found);
        info!(event = "search_end", candidates = found.len());
        found
    }
}
