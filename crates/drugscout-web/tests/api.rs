//! HTTP surface against in-memory oracles.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use drugscout_common::{Availability, Config, RawHit};
use drugscout_discovery::pipeline::Oracles;
use drugscout_discovery::{HistoryLog, InMemoryHistory};
use drugscout_ingestion::normalise::GeneSymbolSet;
use drugscout_ingestion::sources::mock::{
    MockBioactivityOracle, MockCompoundOracle, MockLiteratureOracle, MockStructureOracle, MockTrialsOracle,
};
use drugscout_ingestion::sources::{BioactivityOracle, TrialSummary};
use drugscout_molecules::Scorer;
use drugscout_ranker::DecayRanker;
use drugscout_web::router::build_router;
use drugscout_web::state::{AppState, Services};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

struct PanickingBioactivity;

#[async_trait]
impl BioactivityOracle for PanickingBioactivity {
    async fn compounds_for_target(&self, _gene: &str, _limit: usize) -> Availability<Vec<RawHit>> {
        panic!("bioactivity backend exploded");
    }
}

fn trial() -> TrialSummary {
    TrialSummary {
        nct_id: "NCT00000001".into(),
        title: "Tofersen in SOD1 ALS".into(),
        status: "COMPLETED".into(),
        phase: "PHASE3".into(),
        conditions: vec!["Amyotrophic Lateral Sclerosis".into()],
        interventions: vec!["Tofersen".into()],
        url: "https://clinicaltrials.gov/study/NCT00000001".into(),
    }
}

fn services(bioactivity: Arc<dyn BioactivityOracle>, history: Option<Arc<dyn HistoryLog>>) -> Services {
    let literature = MockLiteratureOracle::new()
        .with_article("11", 2019, "SOD1 misfolding spreads between motor neurons in mouse models of disease.")
        .with_article("12", 2021, "SOD1 antisense therapy lowers protein levels in cerebrospinal fluid of patients.")
        .with_article("13", 2023, "SOD1 aggregates colocalise with GFAP reactive astrocytes in spinal cord.");
    let symbols: GeneSymbolSet = ["SOD1", "GFAP"].into_iter().collect();
    Services {
        oracles: Oracles {
            literature: Arc::new(literature),
            bioactivity,
            structure: Arc::new(MockStructureOracle::new().with_gene("SOD1")),
            compound: Arc::new(MockCompoundOracle::new().with("Riluzole", 234.2)),
        },
        trials: Arc::new(MockTrialsOracle::new(vec![trial()])),
        symbols: Arc::new(symbols),
        scorer: Arc::new(Scorer::deterministic()),
        ranker: Arc::new(DecayRanker),
        history,
    }
}

fn app_with(services: Services) -> Router {
    build_router(AppState::with_services(services, &Config::default()))
}

fn app() -> Router {
    app_with(services(Arc::new(MockBioactivityOracle::new()), None))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn root_reports_status() {
    let (status, body) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "drugscout backend running" }));
}

#[tokio::test]
async fn full_workflow_returns_discovery_and_records_history() {
    let history: Arc<dyn HistoryLog> = Arc::new(InMemoryHistory::new(10));
    let app = app_with(services(Arc::new(MockBioactivityOracle::new()), Some(history.clone())));

    let (status, body) = get(app, "/full_workflow?query=ALS").await;
    assert_eq!(status, StatusCode::OK);
    let discovery = &body["discovery"];
    assert_eq!(discovery["suggested_targets"], json!(["SOD1", "FUS", "TARDBP"]));
    assert_eq!(discovery["structures"]["SOD1"]["found"], json!(true));
    assert_eq!(discovery["gene_compound_scores"]["FUS"].as_array().map(Vec::len), Some(3));
    assert!(discovery["llm_summary"].as_str().unwrap().contains("SOD1"));

    let entries = history.recent(5).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].query, "ALS");
    assert_eq!(entries[0].query_type, "full_workflow");
    assert_eq!(entries[0].result, body);
}

#[tokio::test]
async fn full_workflow_rejects_empty_query() {
    let (status, body) = get(app(), "/full_workflow?query=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn full_workflow_panic_yields_error_shaped_payload() {
    let app = app_with(services(Arc::new(PanickingBioactivity), None));
    let (status, body) = get(app, "/full_workflow?query=BACE1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "discovery": {
                "suggested_targets": [],
                "structures": {},
                "pathways": [],
                "gene_compound_scores": {},
                "llm_summary": "Backend error occurred.",
            }
        })
    );
}

#[tokio::test]
async fn disease_monitor_extracts_genes_and_is_listed_in_history() {
    let history: Arc<dyn HistoryLog> = Arc::new(InMemoryHistory::new(10));
    let app = app_with(services(Arc::new(MockBioactivityOracle::new()), Some(history)));

    let (status, body) = get(app.clone(), "/disease_monitor?disease=ALS").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ranked_targets"][0], json!({ "node": "GFAP", "score": 1.0 }));
    assert_eq!(body["ranked_targets"][1]["node"], "SOD1");
    assert_eq!(body["graph"]["nodes"][0], json!({ "id": "ALS", "type": "disease" }));
    assert_eq!(body["evidence_timeline"]["SOD1"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["rag_ready"], json!(false));

    let (status, listed) = get(app, "/admin/history?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["query_type"], "disease_monitor");
    assert_eq!(listed[0]["result"], body);
}

#[tokio::test]
async fn history_is_empty_when_disabled() {
    let (status, body) = get(app(), "/admin/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn alphafold_found_and_missing() {
    let (_, found) = get(app(), "/alphafold/SOD1").await;
    assert_eq!(found["gene"], "SOD1");
    assert_eq!(found["structure"]["found"], json!(true));

    let (status, missing) = get(app(), "/alphafold/FUS").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(missing["structure"]["found"], json!(false));
    assert!(missing["structure"]["message"].is_string());
}

#[tokio::test]
async fn admet_defaults_to_ideal_descriptors() {
    let (_, body) = post(app(), "/admet", json!({ "compound": "X" })).await;
    assert_eq!(body, json!({ "compound": "X", "admet_score": 0.7 }));

    let (_, heavy) = post(app(), "/admet", json!({ "compound": "Y", "mw": 1200.0, "logp": 9.0 })).await;
    assert_eq!(heavy["admet_score"], json!(0.45));
}

#[tokio::test]
async fn pathways_for_posted_genes() {
    let (status, body) = post(app(), "/pathways", json!({ "genes": ["sod1"] })).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["pathways"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["pathway"].as_str())
        .collect();
    assert!(names.contains(&"ALS disease pathway"));
}

#[tokio::test]
async fn clinical_trials_filters_by_query() {
    let (_, body) = get(app(), "/clinical_trials?query=tofersen").await;
    assert_eq!(body["query"], "tofersen");
    assert_eq!(body["trials"][0]["nct_id"], "NCT00000001");
    assert_eq!(body["confidence"], json!(3));

    let (_, none) = get(app(), "/clinical_trials?query=aducanumab").await;
    assert_eq!(none["trials"], json!([]));
    assert_eq!(none["confidence"], json!(0));
}

#[tokio::test]
async fn rag_explain_uses_abstracts() {
    let (status, body) = get(app(), "/rag_explain?gene=sod1&disease=ALS").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gene"], "SOD1");
    assert_eq!(body["disease"], "ALS");
    assert!(body["explanation"].as_str().unwrap().contains("- SOD1 misfolding spreads"));
}
