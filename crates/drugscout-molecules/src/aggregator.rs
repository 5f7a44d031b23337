//! Candidate aggregation for a gene target.
//!
//! Known ligands come from the bioactivity oracle. When it has nothing for a
//! gene (network failure, rate limit, or an undruggable target) exactly three
//! synthetic placeholders are produced so downstream stages never see an
//! empty list.

use std::sync::Arc;

use drugscout_common::RawHit;
use drugscout_ingestion::sources::BioactivityOracle;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::coerce::{coerce_f64, first_non_blank, Descriptors};

pub const DEFAULT_ACTIVITY_TYPE: &str = "IC50";
pub const DEFAULT_ACTIVITY_VALUE: f64 = 1000.0;
pub const DEFAULT_ACTIVITY_UNITS: &str = "nM";

/// Number of placeholders synthesized for a gene without known ligands.
pub const FALLBACK_COUNT: usize = 3;
const FALLBACK_QSAR: f64 = 0.85;
const FALLBACK_ADMET: f64 = 0.55;

/// How a candidate entered the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CandidateOrigin {
    Bioactivity,
    /// Placeholder with fixed sub-scores.
    Synthetic { qsar: f64, admet: f64 },
}

/// A candidate before scoring, with every field already defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInput {
    pub name: String,
    pub activity_type: String,
    pub activity_value: f64,
    pub activity_units: String,
    pub descriptors: Descriptors,
    pub origin: CandidateOrigin,
}

impl CandidateInput {
    /// Normalise an oracle hit. The name falls back through the provided
    /// name, compound field and external ID to `InSilico_<gene>`.
    pub fn from_hit(gene: &str, hit: &RawHit) -> Self {
        let name = first_non_blank([
            hit.name.as_deref(),
            hit.compound.as_deref(),
            hit.molecule_chembl_id.as_deref(),
        ])
        .map(String::from)
        .unwrap_or_else(|| format!("InSilico_{}", gene));

        Self {
            name,
            activity_type: first_non_blank([hit.activity_type.as_deref()])
                .unwrap_or(DEFAULT_ACTIVITY_TYPE)
                .to_string(),
            activity_value: coerce_f64(hit.activity_value.as_ref(), DEFAULT_ACTIVITY_VALUE),
            activity_units: first_non_blank([hit.activity_units.as_deref()])
                .unwrap_or(DEFAULT_ACTIVITY_UNITS)
                .to_string(),
            descriptors: Descriptors::from_hit(hit),
            origin: CandidateOrigin::Bioactivity,
        }
    }

    /// The `index`-th (0-based) placeholder for `gene`: `InSilico_<gene>_<index+1>`
    /// at `200 + 100·index` nM.
    pub fn synthetic(gene: &str, index: usize) -> Self {
        Self {
            name: format!("InSilico_{}_{}", gene, index + 1),
            activity_type: DEFAULT_ACTIVITY_TYPE.to_string(),
            activity_value: 200.0 + 100.0 * index as f64,
            activity_units: DEFAULT_ACTIVITY_UNITS.to_string(),
            descriptors: Descriptors::default(),
            origin: CandidateOrigin::Synthetic { qsar: FALLBACK_QSAR, admet: FALLBACK_ADMET },
        }
    }

    /// Display form, e.g. `IC50 200 nM`.
    pub fn activity_label(&self) -> String {
        format!("{} {} {}", self.activity_type, self.activity_value, self.activity_units)
    }
}

/// Collects candidates for a gene from a bioactivity oracle.
pub struct CandidateAggregator {
    oracle: Arc<dyn BioactivityOracle>,
    limit: usize,
}

impl CandidateAggregator {
    pub fn new(oracle: Arc<dyn BioactivityOracle>) -> Self {
        Self { oracle, limit: 5 }
    }

    /// Maximum number of oracle hits kept per gene.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Never returns an empty list.
    pub async fn aggregate(&self, gene: &str) -> Vec<CandidateInput> {
        let hits = self
            .oracle
            .compounds_for_target(gene, self.limit)
            .await
            .unwrap_or_default();

        let inputs: Vec<CandidateInput> = hits
            .iter()
            .take(self.limit)
            .map(|h| CandidateInput::from_hit(gene, h))
            .collect();

        if inputs.is_empty() {
            info!(gene, "No bioactivity hits, synthesizing placeholder candidates");
            return (0..FALLBACK_COUNT).map(|i| CandidateInput::synthetic(gene, i)).collect();
        }

        debug!(gene, n = inputs.len(), "Aggregated bioactivity candidates");
        inputs
    }
}
