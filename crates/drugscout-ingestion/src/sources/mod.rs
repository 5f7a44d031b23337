//! External oracle clients and the traits the pipeline consumes them through.

pub mod pubmed;
pub mod chembl;
pub mod alphafold;
pub mod pubchem;
pub mod clinicaltrials;
pub mod mock;

use async_trait::async_trait;
use drugscout_common::{Article, Availability, RawHit, StructureInfo};

pub use alphafold::AlphaFoldClient;
pub use chembl::ChemblClient;
pub use clinicaltrials::{ClinicalTrialsClient, TrialSummary};
pub use pubchem::{CompoundLookup, PubChemClient};
pub use pubmed::PubMedClient;

/// Literature search (PubMed).
#[async_trait]
pub trait LiteratureOracle: Send + Sync {
    /// Search for a query and return up to `limit` article identifiers.
    async fn search(&self, query: &str, limit: usize) -> Availability<Vec<String>>;

    /// Fetch articles (with abstracts) for a list of identifiers.
    async fn fetch_articles(&self, ids: &[String]) -> Availability<Vec<Article>>;
}

/// Known ligands for a gene target (ChEMBL).
#[async_trait]
pub trait BioactivityOracle: Send + Sync {
    async fn compounds_for_target(&self, gene: &str, limit: usize) -> Availability<Vec<RawHit>>;
}

/// Predicted protein structure availability (AlphaFold DB).
#[async_trait]
pub trait StructureOracle: Send + Sync {
    async fn predict(&self, gene: &str) -> Availability<StructureInfo>;
}

/// Small-molecule property lookup (PubChem).
#[async_trait]
pub trait CompoundOracle: Send + Sync {
    async fn lookup(&self, name: &str) -> Availability<CompoundLookup>;
}

/// Registered clinical studies (ClinicalTrials.gov).
#[async_trait]
pub trait TrialsOracle: Send + Sync {
    async fn trials_for(&self, query: &str, limit: usize) -> Availability<Vec<TrialSummary>>;
}
