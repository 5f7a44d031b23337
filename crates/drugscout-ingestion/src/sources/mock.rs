//! In-memory oracle implementations for tests and offline runs.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use drugscout_common::{Article, Availability, RawHit, StructureInfo};

use super::{
    BioactivityOracle, CompoundLookup, CompoundOracle, LiteratureOracle, StructureOracle,
    TrialSummary, TrialsOracle,
};

const OFFLINE: &str = "mock oracle offline";

// ── Literature ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockLiteratureOracle {
    articles: Vec<Article>,
    offline: bool,
}

impl MockLiteratureOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// An oracle that reports every call as unavailable.
    pub fn offline() -> Self {
        Self { offline: true, ..Self::default() }
    }

    pub fn with_article(mut self, pmid: &str, year: i32, abstract_text: &str) -> Self {
        self.articles.push(Article {
            pmid: pmid.to_string(),
            title: format!("Article {}", pmid),
            abstract_text: abstract_text.to_string(),
            year: Some(year),
        });
        self
    }
}

#[async_trait]
impl LiteratureOracle for MockLiteratureOracle {
    async fn search(&self, _query: &str, limit: usize) -> Availability<Vec<String>> {
        if self.offline {
            return Availability::Unavailable(OFFLINE.to_string());
        }
        Availability::Available(self.articles.iter().take(limit).map(|a| a.pmid.clone()).collect())
    }

    async fn fetch_articles(&self, ids: &[String]) -> Availability<Vec<Article>> {
        if self.offline {
            return Availability::Unavailable(OFFLINE.to_string());
        }
        Availability::Available(
            self.articles.iter().filter(|a| ids.contains(&a.pmid)).cloned().collect(),
        )
    }
}

// ── Bioactivity ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockBioactivityOracle {
    hits: HashMap<String, Vec<RawHit>>,
    offline: bool,
    calls: AtomicUsize,
}

impl MockBioactivityOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        Self { offline: true, ..Self::default() }
    }

    pub fn with(mut self, gene: &str, hits: Vec<RawHit>) -> Self {
        self.hits.insert(gene.to_string(), hits);
        self
    }

    /// Number of `compounds_for_target` calls served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BioactivityOracle for MockBioactivityOracle {
    async fn compounds_for_target(&self, gene: &str, limit: usize) -> Availability<Vec<RawHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Availability::Unavailable(OFFLINE.to_string());
        }
        let hits = self.hits.get(gene).cloned().unwrap_or_default();
        Availability::Available(hits.into_iter().take(limit).collect())
    }
}

// ── Structure ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockStructureOracle {
    known: HashSet<String>,
}

impl MockStructureOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gene(mut self, gene: &str) -> Self {
        self.known.insert(gene.to_string());
        self
    }
}

#[async_trait]
impl StructureOracle for MockStructureOracle {
    async fn predict(&self, gene: &str) -> Availability<StructureInfo> {
        if self.known.contains(gene) {
            Availability::Available(StructureInfo::found(gene))
        } else {
            Availability::Unavailable(format!("no prediction for {}", gene))
        }
    }
}

// ── Compound ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockCompoundOracle {
    compounds: HashMap<String, f64>,
}

impl MockCompoundOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, molecular_weight: f64) -> Self {
        self.compounds.insert(name.to_lowercase(), molecular_weight);
        self
    }
}

#[async_trait]
impl CompoundOracle for MockCompoundOracle {
    async fn lookup(&self, name: &str) -> Availability<CompoundLookup> {
        let found = self.compounds.get(&name.to_lowercase()).map(|mw| CompoundLookup {
            is_compound: true,
            compound: Some(name.to_string()),
            molecular_weight: Some(*mw),
            source: Some("mock".to_string()),
            ..Default::default()
        });
        Availability::Available(found.unwrap_or_else(CompoundLookup::not_found))
    }
}

// ── Trials ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockTrialsOracle {
    trials: Vec<TrialSummary>,
}

impl MockTrialsOracle {
    pub fn new(trials: Vec<TrialSummary>) -> Self {
        Self { trials }
    }
}

#[async_trait]
impl TrialsOracle for MockTrialsOracle {
    async fn trials_for(&self, query: &str, limit: usize) -> Availability<Vec<TrialSummary>> {
        let q = query.to_lowercase();
        Availability::Available(
            self.trials
                .iter()
                .filter(|t| {
                    t.title.to_lowercase().contains(&q)
                        || t.conditions.iter().any(|c| c.to_lowercase().contains(&q))
                        || t.interventions.iter().any(|i| i.to_lowercase().contains(&q))
                })
                .take(limit)
                .cloned()
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_bioactivity_counts_calls_and_limits() {
        let hit = RawHit { name: Some("X".into()), ..Default::default() };
        let oracle = MockBioactivityOracle::new().with("APP", vec![hit.clone(); 8]);

        assert_eq!(oracle.compounds_for_target("APP", 5).await.unwrap_or_default().len(), 5);
        assert!(oracle.compounds_for_target("MAPT", 5).await.unwrap_or_default().is_empty());
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test]
    async fn test_offline_literature_is_unavailable() {
        let oracle = MockLiteratureOracle::offline();
        assert!(!oracle.search("x", 5).await.is_available());
    }
}
