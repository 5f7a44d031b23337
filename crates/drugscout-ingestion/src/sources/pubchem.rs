//! PubChem PUG REST property lookup.
//!
//! Diseases and gene symbols are filtered out before any request is made,
//! since PubChem only resolves real chemical names and CIDs.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use drugscout_common::Availability;
use drugscout_common::sandbox::SandboxClient as Client;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::CompoundOracle;

const PUG_COMPOUND_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound";
const PROPERTIES: &str = "MolecularWeight,MolecularFormula,IUPACName";

/// Words that mark a query as something other than a compound.
const NON_COMPOUND_KEYWORDS: &[&str] = &[
    "disease", "syndrome", "cancer", "als", "parkinson",
    "alzheimer", "huntington", "diabetes", "covid",
    "gene", "protein", "mutation",
];

fn gene_like_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z0-9]{2,10}$").expect("static regex"))
}

/// Why a name was rejected before lookup, if it was.
pub fn non_compound_reason(name: &str) -> Option<&'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Some("Invalid compound input.");
    }
    let lower = name.to_lowercase();
    if NON_COMPOUND_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some("PubChem lookup skipped (not a compound).");
    }
    if is_gene_like(name) {
        return Some("PubChem lookup skipped (gene/protein input).");
    }
    None
}

/// Symbol-shaped names: typed upper-case (APP, KRAS), or in any case when
/// they carry a digit (tp53, Bace1). Numeric CIDs stay lookups.
fn is_gene_like(name: &str) -> bool {
    if name.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let has_digit = name.chars().any(|c| c.is_ascii_digit());
    let typed_upper = !name.chars().any(|c| c.is_ascii_lowercase());
    (has_digit || typed_upper) && gene_like_regex().is_match(&name.to_ascii_uppercase())
}

/// Keyword-exclusion and symbol-shape heuristic for compound names.
pub fn looks_like_compound(name: &str) -> bool {
    non_compound_reason(name).is_none()
}

/// Result of a compound lookup. `info` explains a negative result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundLookup {
    pub is_compound: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecular_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iupac_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl CompoundLookup {
    pub fn not_compound(info: impl Into<String>) -> Self {
        Self { is_compound: false, info: Some(info.into()), ..Default::default() }
    }

    pub fn not_found() -> Self {
        Self::not_compound("Compound not found in PubChem.")
    }
}

pub struct PubChemClient {
    client: Client,
}

impl PubChemClient {
    pub fn new(timeout_secs: u64) -> drugscout_common::Result<Self> {
        Ok(Self { client: Client::with_timeout(Duration::from_secs(timeout_secs))? })
    }

    fn property_url(name: &str) -> anyhow::Result<String> {
        let namespace = if name.chars().all(|c| c.is_ascii_digit()) { "cid" } else { "name" };
        let mut url = Url::parse(PUG_COMPOUND_URL)?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("PubChem base URL cannot be a base"))?
            .push(namespace)
            .push(name)
            .push("property")
            .push(PROPERTIES)
            .push("JSON");
        Ok(url.to_string())
    }

    #[instrument(skip(self))]
    async fn fetch_properties(&self, name: &str) -> anyhow::Result<CompoundLookup> {
        let url = Self::property_url(name)?;
        let resp = self.client.get(&url)?.send().await?;

        if !resp.status().is_success() {
            debug!(name, status = %resp.status(), "PubChem has no record");
            return Ok(CompoundLookup::not_found());
        }

        let json: Value = resp.json().await?;
        Ok(parse_properties(name, &json))
    }
}

#[async_trait]
impl CompoundOracle for PubChemClient {
    async fn lookup(&self, name: &str) -> Availability<CompoundLookup> {
        if let Some(reason) = non_compound_reason(name) {
            return Availability::Available(CompoundLookup::not_compound(reason));
        }
        Availability::from_result("pubchem", self.fetch_properties(name.trim()).await)
    }
}

fn parse_properties(name: &str, json: &Value) -> CompoundLookup {
    let Some(p) = json["PropertyTable"]["Properties"].as_array().and_then(|a| a.first()) else {
        return CompoundLookup::not_found();
    };

    let molecular_weight = match &p["MolecularWeight"] {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };

    CompoundLookup {
        is_compound: true,
        compound: Some(name.to_string()),
        molecular_weight,
        formula: p["MolecularFormula"].as_str().map(String::from),
        iupac_name: p["IUPACName"].as_str().map(String::from),
        source: Some("PubChem".to_string()),
        info: None,
    }
}
