//! ClinicalTrials.gov v2 API client.
//!
//! API docs: https://clinicaltrials.gov/data-api/api
//! Endpoint: https://clinicaltrials.gov/api/v2/studies

use std::time::Duration;

use async_trait::async_trait;
use drugscout_common::Availability;
use drugscout_common::sandbox::SandboxClient as Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::TrialsOracle;

const CT_API_URL: &str = "https://clinicaltrials.gov/api/v2/studies";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub nct_id: String,
    pub title: String,
    pub status: String,
    pub phase: String,
    pub conditions: Vec<String>,
    pub interventions: Vec<String>,
    pub url: String,
}

pub struct ClinicalTrialsClient {
    client: Client,
}

impl ClinicalTrialsClient {
    pub fn new(timeout_secs: u64) -> drugscout_common::Result<Self> {
        Ok(Self { client: Client::with_timeout(Duration::from_secs(timeout_secs))? })
    }

    #[instrument(skip(self))]
    async fn search_studies(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<TrialSummary>> {
        let page_size = max_results.to_string();
        let resp = self.client
            .get(CT_API_URL)?
            .query(&[
                ("query.term", query),
                ("pageSize",   page_size.as_str()),
                ("format",     "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        let trials = parse_studies(&resp);
        debug!(n = trials.len(), "ClinicalTrials.gov studies retrieved");
        Ok(trials)
    }
}

#[async_trait]
impl TrialsOracle for ClinicalTrialsClient {
    async fn trials_for(&self, query: &str, limit: usize) -> Availability<Vec<TrialSummary>> {
        Availability::from_result("clinicaltrials", self.search_studies(query, limit).await)
    }
}

fn string_list(v: &Value, pick: impl Fn(&Value) -> Option<&str>) -> Vec<String> {
    v.as_array()
        .map(|items| items.iter().filter_map(&pick).map(String::from).collect())
        .unwrap_or_default()
}

fn parse_studies(resp: &Value) -> Vec<TrialSummary> {
    let Some(studies) = resp["studies"].as_array() else {
        return vec![];
    };

    studies.iter().filter_map(|s| {
        let proto = &s["protocolSection"];
        let nct_id = proto["identificationModule"]["nctId"].as_str()?.to_string();

        Some(TrialSummary {
            title: proto["identificationModule"]["briefTitle"].as_str().unwrap_or("").to_string(),
            status: proto["statusModule"]["overallStatus"].as_str().unwrap_or("UNKNOWN").to_string(),
            phase: proto["designModule"]["phases"]
                .as_array()
                .and_then(|p| p.first())
                .and_then(|p| p.as_str())
                .unwrap_or("NA")
                .to_string(),
            conditions: string_list(&proto["conditionsModule"]["conditions"], |v| v.as_str()),
            interventions: string_list(&proto["armsInterventionsModule"]["interventions"], |v| v["name"].as_str()),
            url: format!("https://clinicaltrials.gov/study/{}", nct_id),
            nct_id,
        })
    }).collect()
}

/// Clinical evidence strength: phase 3 counts 3, phase 2 counts 2, phase 1 counts 1.
pub fn clinical_confidence(trials: &[TrialSummary]) -> u32 {
    trials.iter().map(|t| {
        let phase = t.phase.to_uppercase().replace([' ', '_'], "");
        if phase.contains("PHASE3") || phase.contains("PHASE4") {
            3
        } else if phase.contains("PHASE2") {
            2
        } else if phase.contains("PHASE1") {
            1
        } else {
            0
        }
    }).sum()
}
