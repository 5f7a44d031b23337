//! Direct access to individual engines, outside the full workflow.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use drugscout_common::error::ApiError;
use drugscout_common::StructureInfo;
use drugscout_discovery::pathways::enrich;
use drugscout_discovery::pipeline::narrative;
use drugscout_ingestion::sources::clinicaltrials::clinical_confidence;
use drugscout_molecules::admet::admet_score;
use drugscout_molecules::qsar::{IDEAL_LOGP, IDEAL_MW};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::SharedState;

const TRIALS_LIMIT: usize = 10;
const EXPLAIN_ARTICLES: usize = 5;

/// GET /alphafold/{gene}
pub async fn alphafold(State(state): State<SharedState>, Path(gene): Path<String>) -> Json<Value> {
    let structure = state
        .structures
        .predict(&gene)
        .await
        .unwrap_or_else(|reason| StructureInfo::unavailable(&gene, reason));
    Json(json!({ "gene": gene, "structure": structure }))
}

#[derive(Deserialize)]
pub struct AdmetRequest {
    #[serde(default)]
    pub compound: String,
    pub mw: Option<f64>,
    pub logp: Option<f64>,
}

/// POST /admet
pub async fn admet(Json(req): Json<AdmetRequest>) -> Json<Value> {
    let score = admet_score(req.mw.unwrap_or(IDEAL_MW), req.logp.unwrap_or(IDEAL_LOGP));
    Json(json!({ "compound": req.compound, "admet_score": score }))
}

#[derive(Deserialize)]
pub struct PathwaysRequest {
    #[serde(default)]
    pub genes: Vec<String>,
}

/// POST /pathways
pub async fn pathways(Json(req): Json<PathwaysRequest>) -> Json<Value> {
    let genes: Vec<String> = req
        .genes
        .iter()
        .map(|g| g.trim().to_uppercase())
        .filter(|g| !g.is_empty())
        .collect();
    Json(json!({ "pathways": enrich(&genes) }))
}

#[derive(Deserialize, Default)]
pub struct TrialsParams {
    #[serde(default)]
    pub query: String,
}

/// GET /clinical_trials?query=
pub async fn clinical_trials(
    State(state): State<SharedState>,
    Query(params): Query<TrialsParams>,
) -> Result<Json<Value>, ApiError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::bad_request("query must not be empty"));
    }
    let trials = state.trials.trials_for(query, TRIALS_LIMIT).await.unwrap_or_default();
    let confidence = clinical_confidence(&trials);
    Ok(Json(json!({ "query": query, "trials": trials, "confidence": confidence })))
}

#[derive(Deserialize, Default)]
pub struct ExplainParams {
    #[serde(default)]
    pub gene: String,
    #[serde(default)]
    pub disease: String,
}

/// GET /rag_explain?gene=&disease=
///
/// Grounds the explanation in a handful of abstracts for "gene disease".
pub async fn rag_explain(
    State(state): State<SharedState>,
    Query(params): Query<ExplainParams>,
) -> Result<Json<Value>, ApiError> {
    let gene = params.gene.trim().to_uppercase();
    if gene.is_empty() {
        return Err(ApiError::bad_request("gene must not be empty"));
    }
    let disease = params.disease.trim();

    let search = format!("{} {}", gene, disease);
    let ids = state.literature.search(search.trim(), EXPLAIN_ARTICLES).await.unwrap_or_default();
    let articles = if ids.is_empty() {
        vec![]
    } else {
        state.literature.fetch_articles(&ids).await.unwrap_or_default()
    };

    let explanation = narrative(disease, std::slice::from_ref(&gene), &articles);
    Ok(Json(json!({ "gene": gene, "disease": disease, "explanation": explanation })))
}
