//! Rule-based gene mention extraction validated against HGNC.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use drugscout_ingestion::normalise::GeneSymbolSet;
use regex::Regex;

/// Upper-case tokens that look like symbols but never are.
const STOPWORDS: &[&str] = &[
    "AND", "OR", "IN", "ON", "WITH", "BY", "FROM",
    "PCR", "ELISA", "MRI", "CT", "MS", "MSN",
    "MICE", "HUMAN", "PATIENT", "PATIENTS",
    "IMPACT", "COPE", "PC", "SI", "STS", "KIN",
    "GPT", "CARE", "MEAN", "SEX", "NE",
    "DISEASE", "DISORDER", "SYNDROME",
    "CAUSE", "CAUSES", "MUTATION",
    "SD", "SE", "CI", "HR",
];

/// Symbols shorter than four characters accepted anyway.
const SHORT_SYMBOLS: &[&str] = &["HTT", "APP", "MAPT", "PSEN1", "PSEN2"];

/// Used only when no symbol is found in the text. Keys match the full,
/// lower-cased disease name.
const KNOWN_DISEASE_GENES: &[(&str, &[&str])] = &[
    ("huntington's disease", &["HTT"]),
    ("alzheimer's disease", &["APP", "PSEN1", "PSEN2", "BACE1"]),
    ("parkinson's disease", &["SNCA", "LRRK2"]),
    ("glioblastoma", &["EGFR", "PTEN", "TP53"]),
    ("breast cancer", &["BRCA1", "BRCA2", "TP53"]),
];

fn symbol_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z][A-Z0-9]{1,9}\b").expect("static regex"))
}

/// Extracts gene symbols from free text. Holds the injected HGNC set.
#[derive(Clone)]
pub struct GeneExtractor {
    symbols: Arc<GeneSymbolSet>,
}

impl GeneExtractor {
    pub fn new(symbols: Arc<GeneSymbolSet>) -> Self {
        Self { symbols }
    }

    fn accept(&self, token: &str) -> bool {
        (token.len() >= 4 || SHORT_SYMBOLS.contains(&token))
            && !STOPWORDS.contains(&token)
            && self.symbols.contains(token)
    }

    /// Sorted, de-duplicated HGNC symbols mentioned in `texts`. Falls back to
    /// curated genes for `disease` when the texts yield nothing.
    pub fn extract<'a>(
        &self,
        texts: impl IntoIterator<Item = &'a str>,
        disease: Option<&str>,
    ) -> Vec<String> {
        let mut found = BTreeSet::new();
        for text in texts {
            let upper = text.to_uppercase();
            for token in symbol_regex().find_iter(&upper).map(|m| m.as_str()) {
                if self.accept(token) {
                    found.insert(token.to_string());
                }
            }
        }

        if found.is_empty() {
            if let Some(disease) = disease {
                let key = disease.trim().to_lowercase();
                if let Some((_, genes)) = KNOWN_DISEASE_GENES.iter().find(|(d, _)| *d == key) {
                    found.extend(genes.iter().map(|g| g.to_string()));
                }
            }
        }

        found.into_iter().collect()
    }
}

/// Whether `gene` appears in `text` as a whole symbol, ignoring case.
pub fn mentions(text: &str, gene: &str) -> bool {
    let upper = text.to_uppercase();
    let gene = gene.to_uppercase();
    symbol_regex().find_iter(&upper).any(|m| m.as_str() == gene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor() -> GeneExtractor {
        let set: GeneSymbolSet = ["APP", "BACE1", "NLRP3", "TLR2", "GFAP", "HTT", "CT", "MICE", "SOD1"]
            .into_iter()
            .collect();
        GeneExtractor::new(Arc::new(set))
    }

    #[test]
    fn test_extracts_sorted_unique_hgnc_symbols() {
        let texts = [
            "NLRP3 and Bace1 levels rose in MICE; app cleavage by BACE1 increased.",
            "CT imaging showed GFAP+ astrocytes. FOO1 is not a gene.",
        ];
        let genes = extractor().extract(texts, None);
        assert_eq!(genes, vec!["APP", "BACE1", "GFAP", "NLRP3"]);
    }

    #[test]
    fn test_short_tokens_need_whitelist() {
        // TLR2 is four characters; HTT is whitelisted; "CT" is too short.
        assert_eq!(extractor().extract(["HTT, TLR2 and CT"], None), vec!["HTT", "TLR2"]);
    }

    #[test]
    fn test_disease_fallback_only_when_nothing_found() {
        let e = extractor();
        assert_eq!(e.extract(["no symbols here"], Some("Parkinson's disease")), vec!["LRRK2", "SNCA"]);
        assert_eq!(e.extract(["SOD1 aggregates"], Some("Parkinson's disease")), vec!["SOD1"]);
        assert!(e.extract(Vec::<&str>::new(), Some("unknown disease")).is_empty());
    }

    #[test]
    fn test_mentions() {
        assert!(mentions("Loss of app function", "APP"));
        assert!(!mentions("APPLE extract", "APP"));
    }
}
