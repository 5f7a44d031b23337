//! drugscout-ingestion: Clients for the external bioinformatics oracles.
//!
//! Every client implements one of the oracle traits in [`sources`]; trait
//! methods return [`drugscout_common::Availability`] and never fail.

pub mod sources;
pub mod normalise;
