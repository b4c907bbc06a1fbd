//! Recommender configuration.

use std::str::FromStr;

use crate::backend::Backend;
use crate::decision::{classify, Decision};
use crate::error::{RefinerError, Result};
use crate::probe;
use crate::result::Recommendation;
use crate::runner::Recommender;

/// Default target latency in milliseconds.
pub const DEFAULT_TARGET_MS: u64 = 500;

/// Default lower bound of the memory-cost search, in bytes (16 MiB).
pub const DEFAULT_MIN_MEMORY: u64 = 16 * 1024 * 1024;

/// Default upper bound of the memory-cost search, in bytes (256 MiB).
pub const DEFAULT_MAX_MEMORY: u64 = 256 * 1024 * 1024;

/// Default lower bound of the time-cost scan.
pub const DEFAULT_MIN_TIME: u32 = 2;

/// Default upper bound of the time-cost scan.
pub const DEFAULT_MAX_TIME: u32 = 9;

/// Configuration for a parameter search.
///
/// An immutable value built fluently; every `with_*` method consumes the
/// configuration and returns the updated one, so a running search always
/// holds a frozen snapshot and cannot observe mid-search mutation.
///
/// The probe value fed to the hashing backend is generated once at
/// construction and held constant across every measurement of a run, so the
/// individual timings stay comparable.
///
/// # Example
///
/// ```
/// use argon2_refiner::{Backend, RecommenderConfig};
///
/// let config = RecommenderConfig::new(500)
///     .with_tolerance(Some(100))
///     .with_backend(Backend::Argon)
///     .with_min_time(2)
///     .with_max_time(4);
///
/// assert_eq!(config.target_ms(), 500);
/// assert_eq!(config.tolerance(), Some(100));
/// ```
#[derive(Clone, Debug)]
pub struct RecommenderConfig {
    target_ms: u64,
    tolerance: Option<u64>,
    backend: Backend,
    min_memory: u64,
    max_memory: u64,
    min_time: u32,
    max_time: u32,
    probe_value: String,
}

impl RecommenderConfig {
    /// Creates a configuration targeting the given latency in milliseconds.
    ///
    /// Defaults: `auto` backend, memory bounds 16 MiB to 256 MiB, time costs
    /// 2 to 9, tolerance of half the target.
    ///
    /// The probe value is generated here from the OS random source; if that
    /// source is unavailable a fixed filler is used instead. Construction
    /// never fails on randomness: the probe value's entropy affects only how
    /// realistic the timing is, not the correctness of the search.
    ///
    /// # Example
    ///
    /// ```
    /// use argon2_refiner::RecommenderConfig;
    ///
    /// let config = RecommenderConfig::new(500);
    /// assert_eq!(config.target_ms(), 500);
    /// assert_eq!(config.min_time(), 2);
    /// assert_eq!(config.max_time(), 9);
    /// ```
    pub fn new(target_ms: u64) -> Self {
        Self {
            target_ms,
            tolerance: None,
            backend: Backend::Auto,
            min_memory: DEFAULT_MIN_MEMORY,
            max_memory: DEFAULT_MAX_MEMORY,
            min_time: DEFAULT_MIN_TIME,
            max_time: DEFAULT_MAX_TIME,
            probe_value: probe::generate_probe_value(),
        }
    }

    /// Derives the target latency from a sustained request rate:
    /// `target_ms = round(1000 / requests_per_second)`.
    ///
    /// # Errors
    ///
    /// Returns [`RefinerError::InvalidRequestRate`] when the rate is zero or
    /// negative.
    ///
    /// # Example
    ///
    /// ```
    /// use argon2_refiner::RecommenderConfig;
    ///
    /// assert_eq!(RecommenderConfig::for_requests_per_second(4).unwrap().target_ms(), 250);
    /// assert_eq!(RecommenderConfig::for_requests_per_second(8).unwrap().target_ms(), 125);
    /// assert!(RecommenderConfig::for_requests_per_second(0).is_err());
    /// ```
    pub fn for_requests_per_second(requests_per_second: i32) -> Result<Self> {
        if requests_per_second < 1 {
            return Err(RefinerError::InvalidRequestRate(requests_per_second));
        }
        let target_ms = (1000.0 / f64::from(requests_per_second)).round() as u64;
        Ok(Self::new(target_ms))
    }

    /// Overrides the tolerance window half-width in milliseconds.
    ///
    /// `None` restores the default of half the target (`target >> 1`).
    pub fn with_tolerance(mut self, distance: Option<u64>) -> Self {
        self.tolerance = distance;
        self
    }

    /// Selects the hashing backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Selects the hashing backend by name.
    ///
    /// Accepts `auto`, `argon`, `sodium` and their aliases,
    /// case-insensitively (see [`Backend`]).
    ///
    /// # Errors
    ///
    /// Returns [`RefinerError::InvalidBackend`] for unrecognized names.
    ///
    /// # Example
    ///
    /// ```
    /// use argon2_refiner::{Backend, RecommenderConfig};
    ///
    /// let config = RecommenderConfig::new(500).with_backend_name("libargon2").unwrap();
    /// assert_eq!(config.backend(), Backend::Argon);
    /// assert!(RecommenderConfig::new(500).with_backend_name("md5").is_err());
    /// ```
    pub fn with_backend_name(self, name: &str) -> Result<Self> {
        Ok(self.with_backend(Backend::from_str(name)?))
    }

    /// Sets the lower bound of the memory-cost search, in bytes.
    pub fn with_min_memory(mut self, bytes: u64) -> Self {
        self.min_memory = bytes;
        self
    }

    /// Sets the upper bound of the memory-cost search, in bytes.
    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory = bytes;
        self
    }

    /// Sets the lower bound of the time-cost scan.
    pub fn with_min_time(mut self, time_cost: u32) -> Self {
        self.min_time = time_cost;
        self
    }

    /// Sets the upper bound of the time-cost scan.
    pub fn with_max_time(mut self, time_cost: u32) -> Self {
        self.max_time = time_cost;
        self
    }

    /// Returns the target latency in milliseconds.
    pub fn target_ms(&self) -> u64 {
        self.target_ms
    }

    /// Returns the explicit tolerance, if one was set.
    pub fn tolerance(&self) -> Option<u64> {
        self.tolerance
    }

    /// Returns the backend selector.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns the lower memory-cost bound in bytes.
    pub fn min_memory(&self) -> u64 {
        self.min_memory
    }

    /// Returns the upper memory-cost bound in bytes.
    pub fn max_memory(&self) -> u64 {
        self.max_memory
    }

    /// Returns the lower time-cost bound.
    pub fn min_time(&self) -> u32 {
        self.min_time
    }

    /// Returns the upper time-cost bound.
    pub fn max_time(&self) -> u32 {
        self.max_time
    }

    /// Returns the probe value fed to every measurement of a run.
    pub fn probe_value(&self) -> &str {
        &self.probe_value
    }

    /// Classifies a measured latency against the tolerance window.
    ///
    /// The window is `target` plus or minus the tolerance, inclusive on both
    /// ends; without an explicit tolerance it spans half the target on
    /// either side.
    ///
    /// # Example
    ///
    /// ```
    /// use argon2_refiner::{Decision, RecommenderConfig};
    ///
    /// let config = RecommenderConfig::new(500).with_tolerance(Some(100));
    /// assert_eq!(config.decide(399), Decision::TooFast);
    /// assert_eq!(config.decide(400), Decision::InRange);
    /// assert_eq!(config.decide(600), Decision::InRange);
    /// assert_eq!(config.decide(601), Decision::TooSlow);
    /// ```
    pub fn decide(&self, measured_ms: u64) -> Decision {
        classify(self.target_ms, self.tolerance, measured_ms)
    }

    /// Runs the full parameter search with the configured hashing backend
    /// and returns the in-range samples, slowest first.
    ///
    /// Convenience for [`Recommender::new`] followed by [`Recommender::run`];
    /// see [`Recommender`] for the search algorithm. Every probe blocks on a
    /// real hashing operation near the target latency, so a full search can
    /// take minutes.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use argon2_refiner::RecommenderConfig;
    ///
    /// let config = RecommenderConfig::new(500).with_tolerance(Some(100));
    /// for rec in config.run_benchmarks() {
    ///     println!("m={} t={} ({} ms)", rec.memory_cost, rec.time_cost, rec.measured_ms);
    /// }
    /// ```
    pub fn run_benchmarks(&self) -> Vec<Recommendation> {
        Recommender::new(self.clone()).run()
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_stores_the_target() {
        assert_eq!(RecommenderConfig::new(500).target_ms(), 500);
        assert_eq!(RecommenderConfig::default().target_ms(), DEFAULT_TARGET_MS);
    }

    #[test]
    fn request_rate_rounds_to_the_nearest_millisecond() {
        for (rate, target) in [(4, 250), (8, 125), (10, 100), (25, 40), (3, 333)] {
            let config = RecommenderConfig::for_requests_per_second(rate).unwrap();
            assert_eq!(config.target_ms(), target, "rate = {rate}");
        }
    }

    #[test]
    fn request_rate_must_be_at_least_one() {
        for rate in [0, -1, -25] {
            let err = RecommenderConfig::for_requests_per_second(rate).unwrap_err();
            assert!(matches!(err, RefinerError::InvalidRequestRate(n) if n == rate));
        }
    }

    #[test]
    fn default_tolerance_spans_half_the_target() {
        let config = RecommenderConfig::new(250);
        assert_eq!(config.decide(124), Decision::TooFast);
        assert_eq!(config.decide(125), Decision::InRange);
        assert_eq!(config.decide(375), Decision::InRange);
        assert_eq!(config.decide(376), Decision::TooSlow);
    }

    #[test]
    fn explicit_tolerance_narrows_the_window() {
        let config = RecommenderConfig::new(250).with_tolerance(Some(50));
        assert_eq!(config.decide(199), Decision::TooFast);
        assert_eq!(config.decide(200), Decision::InRange);
        assert_eq!(config.decide(300), Decision::InRange);
        assert_eq!(config.decide(301), Decision::TooSlow);
    }

    #[test]
    fn clearing_the_tolerance_restores_the_default_window() {
        let config = RecommenderConfig::new(250)
            .with_tolerance(Some(50))
            .with_tolerance(None);
        assert_eq!(config.decide(125), Decision::InRange);
        assert_eq!(config.decide(124), Decision::TooFast);
    }

    #[test]
    fn backend_aliases_select_the_same_backend_as_their_canonical_name() {
        let canonical = RecommenderConfig::new(500)
            .with_backend_name("argon")
            .unwrap();
        for alias in ["argon2", "libargon", "libargon2"] {
            let aliased = RecommenderConfig::new(500).with_backend_name(alias).unwrap();
            assert_eq!(aliased.backend(), canonical.backend(), "alias = {alias}");
        }

        let canonical = RecommenderConfig::new(500)
            .with_backend_name("sodium")
            .unwrap();
        for alias in ["nacl", "libsodium"] {
            let aliased = RecommenderConfig::new(500).with_backend_name(alias).unwrap();
            assert_eq!(aliased.backend(), canonical.backend(), "alias = {alias}");
        }
    }

    #[test]
    fn unknown_backend_names_are_rejected() {
        let err = RecommenderConfig::new(500)
            .with_backend_name("bcrypt")
            .unwrap_err();
        assert!(matches!(err, RefinerError::InvalidBackend(name) if name == "bcrypt"));
    }

    #[test]
    fn probe_value_is_fixed_at_construction() {
        let config = RecommenderConfig::new(500);
        assert_eq!(config.probe_value().len(), 128);
        let probe_value = config.probe_value().to_string();
        let config = config.with_tolerance(Some(10)).with_max_time(3);
        assert_eq!(config.probe_value(), probe_value);
    }
}
