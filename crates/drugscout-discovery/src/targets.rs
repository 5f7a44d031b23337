//! Query classification and target identification.

use drugscout_ingestion::sources::pubchem::looks_like_compound;
use serde::{Deserialize, Serialize};

/// Disease keyword → curated gene targets. Matched by case-insensitive
/// containment, first match wins.
const DISEASE_TARGETS: &[(&str, &[&str])] = &[
    ("alzheimer", &["APP", "PSEN1", "PSEN2", "BACE1", "MAPT"]),
    ("parkinson", &["SNCA", "LRRK2"]),
    ("als", &["SOD1", "FUS", "TARDBP"]),
    ("huntington", &["HTT"]),
];

/// Words that mark a query as a disease even without curated targets.
const DISEASE_WORDS: &[&str] = &[
    "disease", "syndrome", "disorder", "cancer", "carcinoma", "tumor", "tumour",
    "glioblastoma", "leukemia", "lymphoma", "sclerosis", "dementia", "diabetes", "covid",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Disease,
    Gene,
    Compound,
}

fn curated_targets(query: &str) -> Option<&'static [&'static str]> {
    let q = query.to_lowercase();
    DISEASE_TARGETS
        .iter()
        .find(|(keyword, _)| q.contains(keyword))
        .map(|(_, genes)| *genes)
}

/// Every query is one of the three kinds: disease when it names a curated
/// or generic disease term, compound when it passes the compound heuristic,
/// gene otherwise.
pub fn classify(query: &str) -> QueryKind {
    let q = query.to_lowercase();
    if curated_targets(query).is_some() || DISEASE_WORDS.iter().any(|w| q.contains(w)) {
        QueryKind::Disease
    } else if looks_like_compound(query) {
        QueryKind::Compound
    } else {
        QueryKind::Gene
    }
}

/// Curated genes for a known disease, otherwise the query itself upper-cased.
pub fn identify_targets(query: &str) -> Vec<String> {
    match curated_targets(query) {
        Some(genes) => genes.iter().map(|g| g.to_string()).collect(),
        None => vec![query.trim().to_uppercase()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_disease_targets() {
        assert_eq!(identify_targets("Alzheimer's disease"), vec!["APP", "PSEN1", "PSEN2", "BACE1", "MAPT"]);
        assert_eq!(identify_targets("early-onset PARKINSON"), vec!["SNCA", "LRRK2"]);
        assert_eq!(identify_targets("familial ALS"), vec!["SOD1", "FUS", "TARDBP"]);
        assert_eq!(identify_targets("Huntington's disease"), vec!["HTT"]);
    }

    #[test]
    fn test_gene_query_is_its_own_target() {
        assert_eq!(identify_targets("BACE1"), vec!["BACE1"]);
        assert_eq!(identify_targets(" lrrk2 "), vec!["LRRK2"]);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("Alzheimer's disease"), QueryKind::Disease);
        assert_eq!(classify("pancreatic cancer"), QueryKind::Disease);
        assert_eq!(classify("BACE1"), QueryKind::Gene);
        assert_eq!(classify("tp53"), QueryKind::Gene);
        assert_eq!(classify("bace1"), QueryKind::Gene);
        assert_eq!(classify("Aspirin"), QueryKind::Compound);
        assert_eq!(classify("imatinib"), QueryKind::Compound);
    }
}
