//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use drugscout_common::config::{Config, HgncConfig};
use drugscout_discovery::pipeline::Oracles;
use drugscout_discovery::{build_history, DiscoveryPipeline, DiseaseMonitor, GeneExtractor, HistoryEntry, HistoryLog};
use drugscout_ingestion::normalise::GeneSymbolSet;
use drugscout_ingestion::sources::{
    AlphaFoldClient, ChemblClient, ClinicalTrialsClient, LiteratureOracle, PubChemClient, PubMedClient,
    StructureOracle, TrialsOracle,
};
use drugscout_molecules::Scorer;
use drugscout_ranker::{build_ranker, TargetRanker};
use serde::Serialize;
use tracing::{info, warn};

/// Everything the handlers reach outside the process through, plus the
/// scoring and ranking engines. Tests assemble this from mocks.
pub struct Services {
    pub oracles: Oracles,
    pub trials: Arc<dyn TrialsOracle>,
    pub symbols: Arc<GeneSymbolSet>,
    pub scorer: Arc<Scorer>,
    pub ranker: Arc<dyn TargetRanker>,
    pub history: Option<Arc<dyn HistoryLog>>,
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<DiscoveryPipeline>,
    pub monitor: Arc<DiseaseMonitor>,
    pub literature: Arc<dyn LiteratureOracle>,
    pub structures: Arc<dyn StructureOracle>,
    pub trials: Arc<dyn TrialsOracle>,
    pub history: Option<Arc<dyn HistoryLog>>,
    pub allowed_origins: Vec<String>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Real oracle clients, HGNC symbols and the configured ranker.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let sources = &config.sources;
        let oracles = Oracles {
            literature: Arc::new(PubMedClient::new(sources)?),
            bioactivity: Arc::new(ChemblClient::new(sources.http_timeout_secs)?),
            structure: Arc::new(AlphaFoldClient::new(sources.alphafold_timeout_secs)?),
            compound: Arc::new(PubChemClient::new(sources.http_timeout_secs)?),
        };

        let services = Services {
            oracles,
            trials: Arc::new(ClinicalTrialsClient::new(sources.http_timeout_secs)?),
            symbols: Arc::new(load_symbols(&config.hgnc).await),
            scorer: Arc::new(Scorer::new(&config.scoring)),
            ranker: Arc::from(build_ranker(&config.ranker)),
            history: build_history(&config.history),
        };
        info!(ranker = services.ranker.name(), "Services ready");
        Ok(Self::with_services(services, config))
    }

    pub fn with_services(services: Services, config: &Config) -> Self {
        let Services { oracles, trials, symbols, scorer, ranker, history } = services;
        let monitor = DiseaseMonitor::new(
            oracles.literature.clone(),
            GeneExtractor::new(symbols),
            ranker.clone(),
        );
        Self {
            literature: oracles.literature.clone(),
            structures: oracles.structure.clone(),
            pipeline: Arc::new(DiscoveryPipeline::new(oracles, scorer, ranker, config)),
            monitor: Arc::new(monitor),
            trials,
            history,
            allowed_origins: config.server.allowed_origins.clone(),
        }
    }

    /// Append to the history log. Failures are logged, never surfaced.
    pub async fn record(&self, query: &str, query_type: &str, result: &impl Serialize) {
        let Some(history) = &self.history else { return };
        let value = match serde_json::to_value(result) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Could not serialize history entry");
                return;
            }
        };
        if let Err(e) = history.insert(HistoryEntry::new(query, query_type, value)).await {
            warn!(error = %e, query_type, "History insert failed");
        }
    }
}

/// An empty set disables gene extraction, so every monitor run falls back
/// to curated genes.
async fn load_symbols(config: &HgncConfig) -> GeneSymbolSet {
    let loaded = if let Some(path) = &config.path {
        GeneSymbolSet::from_path(path).await
    } else if config.download {
        GeneSymbolSet::from_download().await
    } else {
        warn!("No HGNC source configured; gene extraction disabled");
        return GeneSymbolSet::empty();
    };

    match loaded {
        Ok(set) => {
            info!(symbols = set.len(), "Loaded HGNC symbols");
            set
        }
        Err(e) => {
            warn!(error = %e, "HGNC symbols unavailable; gene extraction disabled");
            GeneSymbolSet::empty()
        }
    }
}
