//! Empirical tuning of Argon2 cost parameters.
//!
//! The "right" Argon2 time and memory costs are machine-dependent: they are
//! whatever makes one hash take about as long as you can afford per request
//! on your own hardware, under your own load. This crate discovers them by
//! measuring instead of guessing. It scans time costs linearly, bisects the
//! memory-cost axis for each one, and keeps every combination whose measured
//! latency lands inside a tolerance window around the target. The search is
//! deliberately biased toward the most expensive candidates that still fit,
//! since more memory raises attack cost at no extra latency.
//!
//! # Overview
//!
//! - [`RecommenderConfig`]: target latency, tolerance window, backend and
//!   search bounds, built fluently.
//! - [`Recommender`]: the search engine; [`Recommender::run`] returns the
//!   in-range [`Recommendation`]s, slowest first.
//! - [`Backend`]: `auto`, `argon` (pure Rust) or `sodium` (native libsodium,
//!   behind the `sodium` feature), with alias normalization.
//! - [`CsvExporter`] / [`MarkdownReport`]: render ranked results.
//!
//! # Example
//!
//! ```no_run
//! use argon2_refiner::RecommenderConfig;
//!
//! // Sustain 5 requests per second: target one hash taking about 200 ms.
//! let config = RecommenderConfig::for_requests_per_second(5)?
//!     .with_tolerance(Some(50));
//! for rec in config.run_benchmarks() {
//!     println!("m={} t={} ({} ms)", rec.memory_cost, rec.time_cost, rec.measured_ms);
//! }
//! # Ok::<(), argon2_refiner::RefinerError>(())
//! ```
//!
//! Every probe performs one real, blocking hashing operation near the target
//! latency, and a search runs `(max_time - min_time + 1) * O(log2(memory
//! range))` probes, so a full run can take minutes. Searches are synchronous
//! and single-threaded; there is no cancellation short of the bounded probe
//! count running out.

mod backend;
mod config;
mod decision;
mod error;
mod probe;
mod report;
mod result;
mod runner;

pub use backend::{Backend, ResolvedBackend};
pub use config::{
    RecommenderConfig, DEFAULT_MAX_MEMORY, DEFAULT_MAX_TIME, DEFAULT_MIN_MEMORY,
    DEFAULT_MIN_TIME, DEFAULT_TARGET_MS,
};
pub use decision::Decision;
pub use error::{RefinerError, Result};
pub use probe::{BackendProbe, CostProbe};
pub use report::{CsvExporter, MarkdownReport};
pub use result::Recommendation;
pub use runner::Recommender;
