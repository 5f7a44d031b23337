//! drugscout-molecules - Candidate compounds for gene targets.
//!
//! 1. Collecting known ligands from the bioactivity oracle (or synthesizing
//!    placeholders when there are none)
//! 2. QSAR and ADMET proxy sub-scores from molecular descriptors
//! 3. Composite scoring

pub mod coerce;
pub mod qsar;
pub mod admet;
pub mod scoring;
pub mod aggregator;

pub use aggregator::{CandidateAggregator, CandidateInput, CandidateOrigin};
pub use coerce::Descriptors;
pub use scoring::Scorer;
