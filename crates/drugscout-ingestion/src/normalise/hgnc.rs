//! HGNC approved gene symbols.
//!
//! Loads the HGNC complete set TSV (or any export with a recognisable symbol
//! column) into an in-memory set used to validate gene mentions in free text.
//!
//! Usage:
//! ```ignore
//! let genes = GeneSymbolSet::from_path("data/hgnc_complete_set.txt").await?;
//! assert!(genes.contains("BACE1"));
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use drugscout_common::sandbox::SandboxClient;

/// HGNC bulk download URL (approved complete set, TSV).
const HGNC_COMPLETE_SET_URL: &str =
    "https://storage.googleapis.com/public-download-files/hgnc/tsv/tsv/hgnc_complete_set.txt";

/// Header names accepted as the symbol column, compared lower-cased.
const SYMBOL_COLUMNS: &[&str] = &[
    "approved symbol",
    "symbol",
    "gene symbol",
    "approved_symbol",
    "hgnc symbol",
];

/// Set of approved HGNC symbols, upper-cased.
/// Build once at startup; share as `Arc<GeneSymbolSet>`.
#[derive(Debug, Default, Clone)]
pub struct GeneSymbolSet {
    symbols: HashSet<String>,
}

impl GeneSymbolSet {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// A set that contains nothing. Gene extraction then relies on curated
    /// disease fallbacks only.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from the HGNC complete set downloaded at runtime.
    pub async fn from_download() -> Result<Self> {
        tracing::info!("Downloading HGNC complete set from {}", HGNC_COMPLETE_SET_URL);
        let resp = SandboxClient::new()?
            .get(HGNC_COMPLETE_SET_URL)?
            .send()
            .await
            .context("HGNC download failed")?
            .error_for_status()?
            .text()
            .await
            .context("HGNC response read failed")?;
        Self::from_tsv(&resp)
    }

    /// Build from a TSV file on disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading HGNC file {}", path.display()))?;
        Self::from_tsv(&String::from_utf8_lossy(&bytes))
    }

    /// Build from a TSV string. The first line must be a header containing
    /// one of the known symbol column names.
    pub fn from_tsv(tsv: &str) -> Result<Self> {
        let mut lines = tsv.lines();
        let header = lines.next().unwrap_or_default().to_lowercase();
        let columns: Vec<&str> = header.split('\t').map(str::trim).collect();

        let Some(idx) = columns.iter().position(|c| SYMBOL_COLUMNS.contains(c)) else {
            let preview: Vec<&str> = columns.iter().take(10).copied().collect();
            bail!("HGNC symbol column not found; columns: {:?}", preview);
        };

        let symbols: HashSet<String> = lines
            .filter_map(|line| line.split('\t').nth(idx))
            .map(|s| s.trim().to_uppercase())
            .filter(|s| is_symbol_shaped(s))
            .collect();

        if symbols.is_empty() {
            bail!("HGNC file parsed but no gene symbols were extracted");
        }

        tracing::info!("HGNC symbol set built: {} symbols", symbols.len());
        Ok(Self { symbols })
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    /// Case-insensitive membership test.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(&symbol.trim().to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for GeneSymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().map(|s| s.into().to_uppercase()).collect(),
        }
    }
}

/// 2-10 alphanumeric characters, starting with a letter.
fn is_symbol_shaped(s: &str) -> bool {
    (2..=10).contains(&s.len())
        && s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && s.chars().all(|c| c.is_ascii_alphanumeric())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal synthetic HGNC TSV for unit tests.
    fn sample_tsv() -> String {
        let header = "hgnc_id\tsymbol\tname\tlocus_group\tstatus";
        let rows = [
            "HGNC:620\tAPP\tamyloid beta precursor protein\tprotein-coding gene\tApproved",
            "HGNC:933\tBACE1\tbeta-secretase 1\tprotein-coding gene\tApproved",
            "HGNC:6407\tkras\tKRAS proto-oncogene\tprotein-coding gene\tApproved",
            "HGNC:1\tA\ttoo short\tother\tApproved",
            "HGNC:2\t7SK\tstarts with digit\tnon-coding RNA\tApproved",
            "HGNC:3\tHLA-A\thyphenated\tprotein-coding gene\tApproved",
            "HGNC:4",
        ];
        format!("{header}\n{}\n", rows.join("\n"))
    }

    #[test]
    fn test_from_tsv_filters_symbol_shape() {
        let set = GeneSymbolSet::from_tsv(&sample_tsv()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("APP"));
        assert!(set.contains("KRAS"));
        assert!(!set.contains("7SK"));
        assert!(!set.contains("HLA-A"));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let set = GeneSymbolSet::from_tsv(&sample_tsv()).unwrap();
        assert!(set.contains("bace1"));
        assert!(set.contains(" Bace1 "));
        assert!(!set.contains("NOTAREALGENE"));
    }

    #[test]
    fn test_header_auto_detection() {
        let tsv = "HGNC ID\tApproved Symbol\tApproved Name\nHGNC:11138\tSNCA\tsynuclein alpha\n";
        let set = GeneSymbolSet::from_tsv(tsv).unwrap();
        assert!(set.contains("SNCA"));
    }

    #[test]
    fn test_missing_symbol_column_is_error() {
        let err = GeneSymbolSet::from_tsv("id\tname\n1\tfoo\n").unwrap_err();
        assert!(err.to_string().contains("symbol column not found"));
    }

    #[test]
    fn test_no_symbols_is_error() {
        assert!(GeneSymbolSet::from_tsv("symbol\n1\n-\n").is_err());
        assert!(GeneSymbolSet::from_tsv("").is_err());
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hgnc.txt");
        std::fs::write(&path, sample_tsv()).unwrap();
        let set = GeneSymbolSet::from_path(&path).await.unwrap();
        assert!(set.contains("APP"));
    }

    #[test]
    fn test_from_iter_and_empty() {
        let set: GeneSymbolSet = ["htt", "MAPT"].into_iter().collect();
        assert!(set.contains("HTT"));
        assert!(GeneSymbolSet::empty().is_empty());
    }
}
