//! Outcome type returned by every external oracle.
//!
//! Oracle clients never raise to their callers: a network failure, timeout,
//! non-200 status or undecodable payload becomes `Unavailable(reason)` and the
//! consumer degrades the corresponding field.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    Unavailable(String),
}

impl<T> Availability<T> {
    /// Convert a client result, logging the failure against `oracle`.
    pub fn from_result<E: std::fmt::Display>(oracle: &str, result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Availability::Available(v),
            Err(e) => {
                warn!(oracle, error = %e, "oracle unavailable");
                Availability::Unavailable(e.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    /// The data, or `fallback` when the oracle was unavailable.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Availability::Available(v) => v,
            Availability::Unavailable(_) => fallback,
        }
    }

    pub fn unwrap_or_else<F: FnOnce(&str) -> T>(self, f: F) -> T {
        match self {
            Availability::Available(v) => v,
            Availability::Unavailable(reason) => f(&reason),
        }
    }
}

impl<T: Default> Availability<T> {
    pub fn unwrap_or_default(self) -> T {
        self.unwrap_or_else(|_| T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result_error_becomes_unavailable() {
        let r: Result<Vec<String>, anyhow::Error> = Err(anyhow::anyhow!("timed out"));
        let a = Availability::from_result("pubmed", r);
        assert_eq!(a, Availability::Unavailable("timed out".to_string()));
        assert!(a.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_available_passes_through() {
        let a: Availability<u32> = Availability::from_result("chembl", Ok::<_, String>(3));
        assert!(a.is_available());
        assert_eq!(a.unwrap_or(0), 3);
    }
}
