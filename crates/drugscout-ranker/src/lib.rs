//! drugscout-ranker: Gene target ranking.
//!
//! Two interchangeable rankers behind [`TargetRanker`]:
//! a graph convolution network over the gene list (feature `gnn`) and a
//! deterministic rank-decay fallback. Both return the same shape.

pub mod ranker;
#[cfg(feature = "gnn")]
pub mod gcn;

pub use ranker::{build_ranker, sort_descending, DecayRanker, TargetRanker};
#[cfg(feature = "gnn")]
pub use gcn::GraphRanker;
