//! drugscout-common: Shared types, errors, and configuration used across all drugscout crates.

pub mod error;
pub mod oracle;
pub mod entities;
pub mod sandbox;
pub mod config;

// Re-export commonly used types
pub use config::Config;
pub use entities::{Candidate, CandidateSource, RankedTarget, RawHit, StructureInfo, Article};
pub use error::{DrugscoutError, Result};
pub use oracle::Availability;
