//! drugscout-web: HTTP API for drugscout.
//! Exposes:
//!   - The full discovery workflow
//!   - The disease monitor
//!   - Query history
//!   - Single-engine lookups (AlphaFold, ADMET, pathways, clinical trials, explanations)

pub mod router;
pub mod handlers;
pub mod state;
