//! Hashing backend selection and resolution.

use std::fmt;
use std::str::FromStr;

use crate::error::RefinerError;
use crate::probe;

/// Requested hashing backend.
///
/// `Auto` defers the choice to runtime capability detection: the native
/// libsodium implementation is preferred when it is present and callable,
/// with the pure-Rust Argon2 implementation as the fallback.
///
/// # Example
///
/// ```
/// use argon2_refiner::Backend;
///
/// assert_eq!("libargon2".parse::<Backend>().unwrap(), Backend::Argon);
/// assert_eq!("NaCl".parse::<Backend>().unwrap(), Backend::Sodium);
/// assert!("bcrypt".parse::<Backend>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    /// Resolve at probe time: `Sodium` when the native library is available,
    /// `Argon` otherwise.
    #[default]
    Auto,
    /// Pure-Rust Argon2id (the `argon2` crate).
    Argon,
    /// Native libsodium `crypto_pwhash_str` (requires the `sodium` feature).
    Sodium,
}

impl Backend {
    /// Resolves the selector to a concrete probe backend.
    ///
    /// `Auto` is re-evaluated on every call, so a capability change
    /// mid-process is observable; in practice availability does not change
    /// during a run.
    pub fn resolve(self) -> ResolvedBackend {
        match self {
            Self::Auto => {
                if probe::sodium_available() {
                    ResolvedBackend::Sodium
                } else {
                    ResolvedBackend::Argon
                }
            }
            Self::Argon => ResolvedBackend::Argon,
            Self::Sodium => ResolvedBackend::Sodium,
        }
    }
}

impl FromStr for Backend {
    type Err = RefinerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "argon" | "argon2" | "libargon" | "libargon2" => Ok(Self::Argon),
            "sodium" | "nacl" | "libsodium" => Ok(Self::Sodium),
            _ => Err(RefinerError::InvalidBackend(s.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Argon => write!(f, "argon"),
            Self::Sodium => write!(f, "sodium"),
        }
    }
}

/// Concrete backend a probe call resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedBackend {
    /// Pure-Rust Argon2id.
    Argon,
    /// Native libsodium.
    Sodium,
}

impl fmt::Display for ResolvedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argon => write!(f, "argon"),
            Self::Sodium => write!(f, "sodium"),
        }
    }
}
