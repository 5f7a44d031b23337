//! Append-only query history.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drugscout_common::config::{HistoryBackend, HistoryConfig};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub query: String,
    pub query_type: String,
    pub timestamp: DateTime<Utc>,
    pub result: serde_json::Value,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, query_type: impl Into<String>, result: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            query_type: query_type.into(),
            timestamp: Utc::now(),
            result,
        }
    }
}

#[async_trait]
pub trait HistoryLog: Send + Sync {
    async fn insert(&self, entry: HistoryEntry) -> Result<()>;

    /// Up to `limit` entries, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>>;
}

/// `None` when history is disabled.
pub fn build_history(config: &HistoryConfig) -> Option<Arc<dyn HistoryLog>> {
    match config.backend {
        HistoryBackend::Memory => Some(Arc::new(InMemoryHistory::new(config.capacity))),
        HistoryBackend::Jsonl => Some(Arc::new(JsonlHistory::new(config.path.clone()))),
        HistoryBackend::Disabled => None,
    }
}

// ── In-memory ─────────────────────────────────────────────────────────────────

/// Keeps the most recent `capacity` entries.
pub struct InMemoryHistory {
    entries: RwLock<VecDeque<HistoryEntry>>,
    capacity: usize,
}

impl InMemoryHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: RwLock::new(VecDeque::with_capacity(capacity)), capacity }
    }
}

#[async_trait]
impl HistoryLog for InMemoryHistory {
    async fn insert(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}

// ── JSON lines file ───────────────────────────────────────────────────────────

/// One JSON object per line, appended.
pub struct JsonlHistory {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }
}

#[async_trait]
impl HistoryLog for JsonlHistory {
    async fn insert(&self, entry: HistoryEntry) -> Result<()> {
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("opening history file {}", self.path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e).context("reading history file"),
        };

        let mut entries = Vec::new();
        for line in content.lines().rev().filter(|l| !l.trim().is_empty()) {
            if entries.len() == limit {
                break;
            }
            match serde_json::from_str::<HistoryEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(error = %e, "Skipping malformed history line"),
            }
        }
        Ok(entries)
    }
}
