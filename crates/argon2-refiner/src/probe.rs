//! Wall-clock timing of single hashing invocations.

use std::time::Instant;

use rand::rngs::OsRng;
use rand::TryRngCore;
use tracing::warn;

use crate::backend::{Backend, ResolvedBackend};

/// Length of the probe value fed to every hashing invocation.
pub(crate) const PROBE_VALUE_LEN: usize = 128;

/// Fixed salt for timing probes. Salt content does not affect hashing cost.
const PROBE_SALT: &[u8] = b"argon2refinerbench";

/// Generates the fixed probe value used for every measurement in a run.
///
/// 64 bytes from the OS random source, hex-encoded. When the random source
/// is unavailable a fixed filler of the same length is used instead: the
/// probe value's entropy affects only how realistic the measurement is,
/// never the correctness of the search, so this never fails.
pub(crate) fn generate_probe_value() -> String {
    let mut bytes = [0u8; PROBE_VALUE_LEN / 2];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => hex::encode(bytes),
        Err(err) => {
            warn!(event = "probe_value_fallback", error = %err);
            "X".repeat(PROBE_VALUE_LEN)
        }
    }
}

/// A single measurement capability: run one hashing operation at the given
/// costs and report the elapsed wall-clock time in milliseconds.
///
/// The production implementation is [`BackendProbe`]. Any closure with the
/// matching shape also qualifies, which lets tests drive the search engine
/// with a synthetic latency model instead of real hashing.
pub trait CostProbe {
    /// Measures one hashing invocation with the given cost parameters.
    fn measure(&self, time_cost: u32, memory_bytes: u64, probe_value: &[u8]) -> u64;
}

impl<F> CostProbe for F
where
    F: Fn(u32, u64, &[u8]) -> u64,
{
    fn measure(&self, time_cost: u32, memory_bytes: u64, probe_value: &[u8]) -> u64 {
        self(time_cost, memory_bytes, probe_value)
    }
}

/// Probe backed by a real hashing backend.
///
/// The backend selector is re-resolved on every call, so an `auto` selector
/// observes capability changes between probes.
#[derive(Clone, Copy, Debug)]
pub struct BackendProbe {
    backend: Backend,
}

impl BackendProbe {
    /// Creates a probe for the given backend selector.
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }
}

impl CostProbe for BackendProbe {
    /// Performs exactly one hashing invocation and returns the elapsed
    /// wall-clock time, rounded to the nearest millisecond.
    ///
    /// This is a single untrimmed sample: no repetition, no warm-up, no
    /// outlier rejection. Measurement noise is an inherent property of the
    /// design and callers must accept it.
    fn measure(&self, time_cost: u32, memory_bytes: u64, probe_value: &[u8]) -> u64 {
        let start = Instant::now();
        match self.backend.resolve() {
            ResolvedBackend::Argon => argon_hash(time_cost, memory_bytes, probe_value),
            ResolvedBackend::Sodium => sodium::hash(time_cost, memory_bytes, probe_value),
        }
        (start.elapsed().as_secs_f64() * 1000.0).round() as u64
    }
}

/// One Argon2id invocation via the pure-Rust `argon2` crate.
///
/// The crate rejects out-of-range costs outright, so both costs are clamped
/// into its valid parameter range before the call; the probe itself stays
/// infallible. Memory is converted from bytes to the crate's KiB blocks.
fn argon_hash(time_cost: u32, memory_bytes: u64, probe_value: &[u8]) {
    use argon2::{Algorithm, Argon2, Params, Version};

    let m_cost_kib = (memory_bytes / 1024).clamp(
        u64::from(Params::MIN_M_COST),
        u64::from(Params::MAX_M_COST),
    ) as u32;
    let t_cost = time_cost.clamp(Params::MIN_T_COST, Params::MAX_T_COST);
    if u64::from(m_cost_kib) != memory_bytes / 1024 || t_cost != time_cost {
        warn!(
            event = "params_clamped",
            requested_memory_bytes = memory_bytes,
            requested_time_cost = time_cost,
            memory_cost_kib = m_cost_kib,
            time_cost = t_cost,
        );
    }

    let params = match Params::new(m_cost_kib, t_cost, 1, None) {
        Ok(params) => params,
        Err(err) => {
            warn!(event = "params_rejected", error = %err);
            Params::default()
        }
    };
    let hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let mut output = [0u8; 32];
    if let Err(err) = hasher.hash_password_into(probe_value, PROBE_SALT, &mut output) {
        warn!(event = "hash_failed", backend = "argon", error = %err);
    }
}

/// Reports whether the native libsodium capability is present and callable.
pub(crate) fn sodium_available() -> bool {
    sodium::available()
}

#[cfg(feature = "sodium")]
mod sodium {
    use tracing::warn;

    pub(crate) fn available() -> bool {
        // sodium_init is idempotent; negative means the library is unusable.
        unsafe { libsodium_sys::sodium_init() >= 0 }
    }

    /// One `crypto_pwhash_str` invocation with the given costs.
    ///
    /// opslimit carries the time cost and memlimit the memory cost in bytes,
    /// both raised to libsodium's minimums when necessary.
    pub(crate) fn hash(time_cost: u32, memory_bytes: u64, probe_value: &[u8]) {
        if !available() {
            warn!(event = "sodium_unavailable");
            return;
        }
        let opslimit = u64::from(time_cost).max(libsodium_sys::crypto_pwhash_OPSLIMIT_MIN as u64);
        let memlimit = memory_bytes.max(libsodium_sys::crypto_pwhash_MEMLIMIT_MIN as u64) as usize;
        let mut out = [0u8; libsodium_sys::crypto_pwhash_STRBYTES as usize];
        let rc = unsafe {
            libsodium_sys::crypto_pwhash_str(
                out.as_mut_ptr() as *mut libc::c_char,
                probe_value.as_ptr() as *const libc::c_char,
                probe_value.len() as libc::c_ulonglong,
                opslimit as libc::c_ulonglong,
                memlimit as libc::size_t,
            )
        };
        if rc != 0 {
            warn!(event = "hash_failed", backend = "sodium", rc);
        }
    }
}

#[cfg(not(feature = "sodium"))]
mod sodium {
    pub(crate) fn available() -> bool {
        false
    }

    pub(crate) fn hash(_time_cost: u32, _memory_bytes: u64, _probe_value: &[u8]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_value_is_128_hex_chars() {
        let value = generate_probe_value();
        assert_eq!(value.len(), PROBE_VALUE_LEN);
        assert!(value.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn probe_values_differ_between_constructions() {
        assert_ne!(generate_probe_value(), generate_probe_value());
    }

    #[test]
    fn closures_are_probes() {
        let probe = |time_cost: u32, memory_bytes: u64, _probe_value: &[u8]| {
            u64::from(time_cost) * (memory_bytes >> 20)
        };
        assert_eq!(probe.measure(3, 4 << 20, b""), 12);
    }

    #[test]
    fn argon_probe_measures_a_cheap_hash() {
        // Cheapest valid parameters so the test stays fast.
        let probe = BackendProbe::new(Backend::Argon);
        let elapsed = probe.measure(1, 8 * 1024, b"probe");
        assert!(elapsed < 5_000, "elapsed = {elapsed} ms");
    }

    #[test]
    fn argon_probe_clamps_degenerate_costs() {
        // Zero costs are below the hashing crate's minimums; the probe must
        // clamp rather than fail.
        let probe = BackendProbe::new(Backend::Argon);
        let _ = probe.measure(0, 0, b"probe");
    }
}
