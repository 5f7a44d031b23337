//! Configuration loading for drugscout.
//! Reads drugscout.toml from the current directory or the path in DRUGSCOUT_CONFIG.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DrugscoutError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub ranker: RankerConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub hgnc: HgncConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Empty means any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 8000 }
fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub pubmed_api_key: Option<String>,
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    #[serde(default = "default_tool_name")]
    pub tool_name: String,
    #[serde(default = "default_literature_limit")]
    pub literature_limit: usize,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_alphafold_timeout")]
    pub alphafold_timeout_secs: u64,
}

fn default_contact_email()     -> String { "researcher@example.com".to_string() }
fn default_tool_name()         -> String { "drugscout".to_string() }
fn default_literature_limit()  -> usize  { 5 }
fn default_http_timeout()      -> u64    { 20 }
fn default_alphafold_timeout() -> u64    { 5 }

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            pubmed_api_key: None,
            contact_email: default_contact_email(),
            tool_name: default_tool_name(),
            literature_limit: default_literature_limit(),
            http_timeout_secs: default_http_timeout(),
            alphafold_timeout_secs: default_alphafold_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Half-width of the uniform jitter added to QSAR scores. 0 disables it.
    #[serde(default = "default_jitter")]
    pub jitter_amplitude: f64,
    pub seed: Option<u64>,
}

fn default_jitter() -> f64 { 0.05 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { jitter_amplitude: default_jitter(), seed: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankerMode {
    /// Graph convolution relevance model.
    Graph,
    /// Deterministic 1/(rank+1) decay.
    Decay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankerConfig {
    #[serde(default = "default_ranker_mode")]
    pub mode: RankerMode,
    pub seed: Option<u64>,
    #[serde(default = "default_hidden_dim")]
    pub hidden_dim: usize,
}

fn default_ranker_mode() -> RankerMode { RankerMode::Graph }
fn default_hidden_dim()  -> usize      { 16 }

impl Default for RankerConfig {
    fn default() -> Self {
        Self { mode: default_ranker_mode(), seed: None, hidden_dim: default_hidden_dim() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_compounds_per_target")]
    pub compounds_per_target: usize,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default = "bool_true")]
    pub fetch_abstracts: bool,
}

fn default_compounds_per_target() -> usize { 5 }
fn default_max_concurrency()      -> usize { 4 }
fn bool_true()                    -> bool  { true }

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            compounds_per_target: default_compounds_per_target(),
            max_concurrency: default_max_concurrency(),
            fetch_abstracts: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HgncConfig {
    /// Local HGNC complete-set TSV.
    pub path: Option<PathBuf>,
    /// Download the complete set at start-up when no path is given.
    #[serde(default)]
    pub download: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryBackend {
    Memory,
    Jsonl,
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_backend")]
    pub backend: HistoryBackend,
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

fn default_history_backend()  -> HistoryBackend { HistoryBackend::Memory }
fn default_history_path()     -> PathBuf        { PathBuf::from("./history.jsonl") }
fn default_history_capacity() -> usize          { 500 }

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: default_history_backend(),
            path: default_history_path(),
            capacity: default_history_capacity(),
        }
    }
}

impl Config {
    /// Load configuration.
    /// Checks DRUGSCOUT_CONFIG first, then drugscout.toml in the current directory.
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var("DRUGSCOUT_CONFIG")
            .unwrap_or_else(|_| "drugscout.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            tracing::info!("Config file {} not found, using defaults", path);
            Config::default()
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DrugscoutError::Config(e.to_string()))
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("DRUGSCOUT_PUBMED_API_KEY") {
            if !key.is_empty() {
                self.sources.pubmed_api_key = Some(key);
            }
        }
        if let Ok(host) = std::env::var("DRUGSCOUT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("DRUGSCOUT_PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let c = Config::from_toml("").unwrap();
        assert_eq!(c.server.port, 8000);
        assert_eq!(c.ranker.mode, RankerMode::Graph);
        assert_eq!(c.pipeline.compounds_per_target, 5);
        assert_eq!(c.history.backend, HistoryBackend::Memory);
        assert!((c.scoring.jitter_amplitude - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_partial_sections() {
        let c = Config::from_toml(
            r#"
            [ranker]
            mode = "decay"

            [scoring]
            jitter_amplitude = 0.0
            seed = 7

            [server]
            allowed_origins = []
            "#,
        )
        .unwrap();
        assert_eq!(c.ranker.mode, RankerMode::Decay);
        assert_eq!(c.ranker.hidden_dim, 16);
        assert_eq!(c.scoring.seed, Some(7));
        assert!(c.server.allowed_origins.is_empty());
        assert_eq!(c.server.host, "127.0.0.1");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = Config::from_toml("[ranker]\nmode = \"quantum\"").unwrap_err();
        assert!(matches!(err, DrugscoutError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[pipeline]\nmax_concurrency = 2").unwrap();
        let c = Config::from_file(f.path()).unwrap();
        assert_eq!(c.pipeline.max_concurrency, 2);
        assert!(c.pipeline.fetch_abstracts);
    }
}
