//! Orchestrator for the discovery pipeline.
//!
//! literature → target identification → structures + candidates (per gene,
//! concurrent, order preserved) → ranking → pathways → narrative.
//! Oracle failures degrade their field; the only error is an empty query.

use std::sync::Arc;

use drugscout_common::config::Config;
use drugscout_common::{Article, Candidate, DrugscoutError, RankedTarget, Result, StructureInfo};
use drugscout_ingestion::sources::{
    BioactivityOracle, CompoundLookup, CompoundOracle, LiteratureOracle, StructureOracle,
};
use drugscout_molecules::{CandidateAggregator, Scorer};
use drugscout_ranker::TargetRanker;
use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::explain::explain;
use crate::genes::mentions;
use crate::pathways::{enrich, PathwayHit};
use crate::targets::{classify, identify_targets, QueryKind};

const STRUCTURE_FALLBACK_MESSAGE: &str = "AlphaFold unavailable (timeout-safe fallback).";

/// Combined result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub query: String,
    pub query_kind: QueryKind,
    /// Literature identifiers (PMIDs).
    pub literature: Vec<String>,
    pub suggested_targets: Vec<String>,
    pub ranked_targets: Vec<RankedTarget>,
    pub structures: IndexMap<String, StructureInfo>,
    pub pathways: Vec<PathwayHit>,
    /// Keyed in `suggested_targets` order.
    pub gene_compound_scores: IndexMap<String, Vec<Candidate>>,
    pub llm_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound_info: Option<CompoundLookup>,
}

/// External collaborators the pipeline consumes.
#[derive(Clone)]
pub struct Oracles {
    pub literature: Arc<dyn LiteratureOracle>,
    pub bioactivity: Arc<dyn BioactivityOracle>,
    pub structure: Arc<dyn StructureOracle>,
    pub compound: Arc<dyn CompoundOracle>,
}

pub struct DiscoveryPipeline {
    oracles: Oracles,
    aggregator: CandidateAggregator,
    scorer: Arc<Scorer>,
    ranker: Arc<dyn TargetRanker>,
    literature_limit: usize,
    max_concurrency: usize,
    fetch_abstracts: bool,
}

impl DiscoveryPipeline {
    pub fn new(oracles: Oracles, scorer: Arc<Scorer>, ranker: Arc<dyn TargetRanker>, config: &Config) -> Self {
        let aggregator = CandidateAggregator::new(oracles.bioactivity.clone())
            .with_limit(config.pipeline.compounds_per_target);
        Self {
            oracles,
            aggregator,
            scorer,
            ranker,
            literature_limit: config.sources.literature_limit,
            max_concurrency: config.pipeline.max_concurrency.max(1),
            fetch_abstracts: config.pipeline.fetch_abstracts,
        }
    }

    #[instrument(skip(self))]
    pub async fn run(&self, query: &str) -> Result<DiscoveryReport> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DrugscoutError::Pipeline("query must not be empty".to_string()));
        }

        // Literature
        let literature = self
            .oracles
            .literature
            .search(query, self.literature_limit)
            .await
            .unwrap_or_default();
        debug!(n = literature.len(), "Literature identifiers");

        // Target identification
        let query_kind = classify(query);
        let targets = identify_targets(query);
        info!(?query_kind, ?targets, "Identified targets");

        let compound_info = match query_kind {
            QueryKind::Compound => Some(
                self.oracles
                    .compound
                    .lookup(query)
                    .await
                    .unwrap_or_else(|reason| CompoundLookup::not_compound(format!("PubChem unavailable: {}", reason))),
            ),
            _ => None,
        };

        // Structures and candidates
        let per_gene: Vec<(String, StructureInfo, Vec<Candidate>)> = stream::iter(targets.clone())
            .map(|gene| self.process_gene(gene))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let mut structures = IndexMap::with_capacity(per_gene.len());
        let mut gene_compound_scores = IndexMap::with_capacity(per_gene.len());
        for (gene, structure, candidates) in per_gene {
            structures.insert(gene.clone(), structure);
            gene_compound_scores.insert(gene, candidates);
        }

        // Ranking and pathways
        let ranked_targets = self.ranker.rank(&targets);
        let pathways = enrich(&targets);

        // Narrative
        let articles = self.fetch_abstracts(&literature).await;
        let llm_summary = narrative(query, &targets, &articles);

        info!(targets = targets.len(), "Discovery pipeline complete");
        Ok(DiscoveryReport {
            query: query.to_string(),
            query_kind,
            literature,
            suggested_targets: targets,
            ranked_targets,
            structures,
            pathways,
            gene_compound_scores,
            llm_summary,
            compound_info,
        })
    }

    async fn process_gene(&self, gene: String) -> (String, StructureInfo, Vec<Candidate>) {
        let (structure, inputs) = tokio::join!(
            self.oracles.structure.predict(&gene),
            self.aggregator.aggregate(&gene),
        );
        let structure = structure.unwrap_or_else(|_| StructureInfo::unavailable(&gene, STRUCTURE_FALLBACK_MESSAGE));
        let candidates = self.scorer.score_all(&inputs);
        (gene, structure, candidates)
    }

    async fn fetch_abstracts(&self, ids: &[String]) -> Vec<Article> {
        if !self.fetch_abstracts || ids.is_empty() {
            return vec![];
        }
        self.oracles.literature.fetch_articles(ids).await.unwrap_or_default()
    }
}

/// One explanation per gene, separated by blank lines. Each gene gets the
/// abstracts that mention it, or every abstract when none do.
pub fn narrative(disease: &str, genes: &[String], articles: &[Article]) -> String {
    genes
        .iter()
        .map(|gene| {
            let relevant: Vec<&str> = articles
                .iter()
                .filter(|a| mentions(&a.abstract_text, gene))
                .map(|a| a.abstract_text.as_str())
                .collect();
            let text = if relevant.is_empty() {
                articles.iter().map(|a| a.abstract_text.as_str()).collect::<Vec<_>>().join(" ")
            } else {
                relevant.join(" ")
            };
            explain(gene, disease, &text)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
