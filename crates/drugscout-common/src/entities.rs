//! Core entity types shared by the oracle clients, the scorer and the pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Bioactivity hit (oracle output, loosely typed)
// ---------------------------------------------------------------------------

/// A single hit returned by the bioactivity oracle.
///
/// Fields are kept loose on purpose: upstream payloads mix numbers and
/// numeric strings, and any field may be missing. The aggregator coerces them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub compound: Option<String>,
    #[serde(default)]
    pub molecule_chembl_id: Option<String>,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub activity_value: Option<Value>,
    #[serde(default)]
    pub activity_units: Option<String>,
    #[serde(default, rename = "MW")]
    pub mw: Option<Value>,
    #[serde(default, rename = "LogP")]
    pub logp: Option<Value>,
    #[serde(default, rename = "HBD")]
    pub hbd: Option<Value>,
    #[serde(default, rename = "HBA")]
    pub hba: Option<Value>,
    #[serde(default, rename = "TPSA")]
    pub tpsa: Option<Value>,
}

// ---------------------------------------------------------------------------
// Scored candidate
// ---------------------------------------------------------------------------

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Reported by the bioactivity oracle.
    Bioactivity,
    /// Placeholder synthesized when the oracle returned nothing.
    Synthetic,
}

/// A small molecule scored against a gene target. Immutable once scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub activity_type: String,
    pub activity_value: f64,
    pub activity_units: String,
    /// Display form, e.g. `IC50 200 nM`.
    pub activity: String,
    pub admet_score: f64,
    pub qsar_score: f64,
    pub final_score: f64,
    pub source: CandidateSource,
}

// ---------------------------------------------------------------------------
// Ranked target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTarget {
    pub gene: String,
    pub score: f64,
}

impl RankedTarget {
    pub fn new(gene: impl Into<String>, score: f64) -> Self {
        Self { gene: gene.into(), score }
    }
}

// ---------------------------------------------------------------------------
// Structure prediction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureInfo {
    pub found: bool,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StructureInfo {
    /// Manual search link for a gene on the AlphaFold DB site.
    pub fn search_link(gene: &str) -> String {
        format!("https://alphafold.ebi.ac.uk/search/text/{}", gene)
    }

    pub fn found(gene: &str) -> Self {
        Self { found: true, link: Self::search_link(gene), message: None }
    }

    pub fn unavailable(gene: &str, reason: impl Into<String>) -> Self {
        Self {
            found: false,
            link: Self::search_link(gene),
            message: Some(reason.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Literature
// ---------------------------------------------------------------------------

/// A PubMed article with its abstract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub pmid: String,
    pub title: String,
    pub abstract_text: String,
    pub year: Option<i32>,
}
