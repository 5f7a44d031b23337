//! drugscout-discovery: From a free-text query to targets, compounds and a narrative.
//!
//! The [`DiscoveryPipeline`] sequences literature search, target
//! identification, structure lookup, candidate aggregation and scoring,
//! ranking and explanation. [`DiseaseMonitor`] tracks gene mentions in recent
//! literature for a disease. Results can be appended to a [`HistoryLog`].

pub mod targets;
pub mod explain;
pub mod pathways;
pub mod genes;
pub mod monitor;
pub mod history;
pub mod pipeline;

pub use genes::GeneExtractor;
pub use history::{build_history, HistoryEntry, HistoryLog, InMemoryHistory, JsonlHistory};
pub use monitor::{DiseaseMonitor, MonitorReport};
pub use pipeline::{DiscoveryPipeline, DiscoveryReport};
pub use targets::QueryKind;
