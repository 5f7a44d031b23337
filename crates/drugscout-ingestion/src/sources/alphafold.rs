//! AlphaFold DB prediction lookup.
//!
//! Only availability is reported; the structure file itself is left to the
//! user via the manual search link.

use std::time::Duration;

use async_trait::async_trait;
use drugscout_common::sandbox::SandboxClient as Client;
use drugscout_common::{Availability, StructureInfo};
use tracing::{debug, instrument};

use super::StructureOracle;

const PREDICTION_API_URL: &str = "https://alphafold.ebi.ac.uk/api/prediction";

pub struct AlphaFoldClient {
    client: Client,
}

impl AlphaFoldClient {
    pub fn new(timeout_secs: u64) -> drugscout_common::Result<Self> {
        Ok(Self { client: Client::with_timeout(Duration::from_secs(timeout_secs))? })
    }

    #[instrument(skip(self))]
    async fn fetch_prediction(&self, gene: &str) -> anyhow::Result<StructureInfo> {
        let url = format!("{}/{}", PREDICTION_API_URL, gene);
        let resp = self.client.get(&url)?.send().await?;

        if !resp.status().is_success() {
            anyhow::bail!("AlphaFold returned HTTP {}", resp.status());
        }
        debug!(gene, "AlphaFold prediction available");
        Ok(StructureInfo::found(gene))
    }
}

#[async_trait]
impl StructureOracle for AlphaFoldClient {
    async fn predict(&self, gene: &str) -> Availability<StructureInfo> {
        Availability::from_result("alphafold", self.fetch_prediction(gene).await)
    }
}
