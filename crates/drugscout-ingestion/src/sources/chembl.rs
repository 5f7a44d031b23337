//! ChEMBL API client.
//!
//! Resolves a gene symbol to a single-protein ChEMBL target, then pulls
//! IC50/EC50/Ki activities reported against it.
//!
//! API docs: https://chembl.gitbook.io/chembl-interface-documentation/web-resources/chembl-api
//! Endpoint: https://www.ebi.ac.uk/chembl/api/data

use std::time::Duration;

use async_trait::async_trait;
use drugscout_common::sandbox::SandboxClient as Client;
use drugscout_common::{Availability, RawHit};
use serde_json::Value;
use tracing::{debug, instrument};

use super::BioactivityOracle;

const CHEMBL_API_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";

/// Activities fetched per target before filtering.
const ACTIVITY_PAGE: usize = 50;

pub struct ChemblClient {
    client: Client,
}

impl ChemblClient {
    pub fn new(timeout_secs: u64) -> drugscout_common::Result<Self> {
        Ok(Self { client: Client::with_timeout(Duration::from_secs(timeout_secs))? })
    }

    /// Resolve a gene symbol to the first SINGLE PROTEIN target ChEMBL ID.
    #[instrument(skip(self))]
    pub async fn resolve_target(&self, gene: &str) -> anyhow::Result<Option<String>> {
        let url = format!("{}/target/search.json", CHEMBL_API_URL);

        let json: Value = self.client
            .get(&url)?
            .header("Accept", "application/json")
            .query(&[("q", gene)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(first_single_protein(&json))
    }

    /// Fetch raw activity records for a target.
    #[instrument(skip(self))]
    pub async fn fetch_target_activities(&self, target_chembl_id: &str) -> anyhow::Result<Value> {
        let url = format!("{}/activity.json", CHEMBL_API_URL);
        let limit = ACTIVITY_PAGE.to_string();

        let json: Value = self.client
            .get(&url)?
            .header("Accept", "application/json")
            .query(&[
                ("target_chembl_id", target_chembl_id),
                ("standard_type__in", "IC50,EC50,Ki"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(json)
    }

    async fn hits_for_gene(&self, gene: &str, limit: usize) -> anyhow::Result<Vec<RawHit>> {
        let Some(target_id) = self.resolve_target(gene).await? else {
            debug!(gene, "No single-protein ChEMBL target");
            return Ok(vec![]);
        };
        debug!(gene, target = %target_id, "Resolved ChEMBL target");

        let json = self.fetch_target_activities(&target_id).await?;
        Ok(parse_activities(&json, limit))
    }
}

#[async_trait]
impl BioactivityOracle for ChemblClient {
    async fn compounds_for_target(&self, gene: &str, limit: usize) -> Availability<Vec<RawHit>> {
        Availability::from_result("chembl", self.hits_for_gene(gene, limit).await)
    }
}

fn first_single_protein(json: &Value) -> Option<String> {
    json["targets"]
        .as_array()?
        .iter()
        .find(|t| t["target_type"].as_str() == Some("SINGLE PROTEIN"))
        .and_then(|t| t["target_chembl_id"].as_str())
        .map(String::from)
}

/// Convert an activity page into hits. Records without a molecule ID, a
/// numeric standard value or units are skipped. Stops after `limit` hits.
pub fn parse_activities(json: &Value, limit: usize) -> Vec<RawHit> {
    let Some(activities) = json["activities"].as_array() else {
        return vec![];
    };

    activities
        .iter()
        .filter_map(|a| {
            let mol_id = a["molecule_chembl_id"].as_str()?;
            let units = a["standard_units"].as_str().filter(|u| !u.is_empty())?;
            let value = match &a["standard_value"] {
                Value::Number(n) => n.as_f64()?,
                Value::String(s) => s.trim().parse::<f64>().ok()?,
                _ => return None,
            };

            Some(RawHit {
                name: a["molecule_pref_name"].as_str().map(String::from),
                molecule_chembl_id: Some(mol_id.to_string()),
                activity_type: a["standard_type"].as_str().map(String::from),
                activity_value: Some(Value::from(value)),
                activity_units: Some(units.to_string()),
                ..Default::default()
            })
        })
        .take(limit)
        .collect()
}
