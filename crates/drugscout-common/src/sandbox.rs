use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::error::DrugscoutError;

const USER_AGENT: &str = concat!("drugscout/", env!("CARGO_PKG_VERSION"));

/// An HTTP client that only allows requests to approved domains.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient with the default allowlist and a 30 s timeout.
    pub fn new() -> Result<Self, DrugscoutError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Creates a new SandboxClient with the default allowlist of bioinformatics domains.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DrugscoutError> {
        let domains = [
            "eutils.ncbi.nlm.nih.gov",   // PubMed
            "pubchem.ncbi.nlm.nih.gov",  // PubChem PUG REST
            "ebi.ac.uk",                 // ChEMBL, AlphaFold
            "clinicaltrials.gov",        // ClinicalTrials
            "storage.googleapis.com",    // HGNC bulk download
            "localhost",
            "127.0.0.1",
        ];
        let allowlist = domains.iter().map(|d| d.to_string()).collect();

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DrugscoutError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, DrugscoutError> {
        if !self.is_allowed(url) {
            return Err(DrugscoutError::SecurityError(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
