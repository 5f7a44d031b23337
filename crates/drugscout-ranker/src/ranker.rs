//! Ranker capability and the rank-decay fallback.

use std::cmp::Ordering;

use drugscout_common::config::{RankerConfig, RankerMode};
use drugscout_common::RankedTarget;

/// Orders genes by importance.
///
/// Given N gene symbols an implementation returns N `(gene, score)` pairs,
/// descending by score, ties in input order.
pub trait TargetRanker: Send + Sync {
    fn rank(&self, genes: &[String]) -> Vec<RankedTarget>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

/// Stable descending sort by score. Non-finite scores sort last, unchanged.
pub fn sort_descending(mut ranked: Vec<RankedTarget>) -> Vec<RankedTarget> {
    ranked.sort_by(|a, b| match (a.score.is_finite(), b.score.is_finite()) {
        (true, true) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    });
    ranked
}

/// `score = round(1 / (index + 1), 3)` in input order.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecayRanker;

impl DecayRanker {
    pub fn scores(n: usize) -> Vec<f64> {
        (0..n).map(|i| (1000.0 / (i as f64 + 1.0)).round() / 1000.0).collect()
    }
}

impl TargetRanker for DecayRanker {
    fn rank(&self, genes: &[String]) -> Vec<RankedTarget> {
        let ranked = genes
            .iter()
            .zip(Self::scores(genes.len()))
            .map(|(g, s)| RankedTarget::new(g.clone(), s))
            .collect();
        sort_descending(ranked)
    }

    fn name(&self) -> &'static str {
        "decay"
    }
}

/// Select a ranker from configuration.
pub fn build_ranker(config: &RankerConfig) -> Box<dyn TargetRanker> {
    match config.mode {
        RankerMode::Decay => Box::new(DecayRanker),
        #[cfg(feature = "gnn")]
        RankerMode::Graph => Box::new(crate::gcn::GraphRanker::new(config)),
        #[cfg(not(feature = "gnn"))]
        RankerMode::Graph => {
            tracing::warn!("graph ranker requested but built without the `gnn` feature, using decay");
            Box::new(DecayRanker)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn genes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_decay_ranking() {
        let ranked = DecayRanker.rank(&genes(&["A", "B", "C"]));
        assert_eq!(
            ranked,
            vec![
                RankedTarget::new("A", 1.0),
                RankedTarget::new("B", 0.5),
                RankedTarget::new("C", 0.333),
            ]
        );
    }

    #[test]
    fn test_decay_empty() {
        assert!(DecayRanker.rank(&[]).is_empty());
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let ranked = sort_descending(vec![
            RankedTarget::new("X", 0.2),
            RankedTarget::new("Y", 0.9),
            RankedTarget::new("Z", 0.2),
            RankedTarget::new("W", 0.9),
        ]);
        let order: Vec<_> = ranked.iter().map(|r| r.gene.as_str()).collect();
        assert_eq!(order, vec!["Y", "W", "X", "Z"]);
    }

    #[test]
    fn test_non_finite_scores_sort_last() {
        let ranked = sort_descending(vec![
            RankedTarget::new("N", f64::NAN),
            RankedTarget::new("I", f64::INFINITY),
            RankedTarget::new("M", -3.0),
            RankedTarget::new("K", 0.5),
        ]);
        let order: Vec<_> = ranked.iter().map(|r| r.gene.as_str()).collect();
        assert_eq!(order, vec!["K", "M", "N", "I"]);
        assert!(ranked[2].score.is_nan());
        assert_eq!(ranked[3].score, f64::INFINITY);
    }

    #[test]
    fn test_build_ranker_decay_mode() {
        let config = RankerConfig { mode: RankerMode::Decay, ..Default::default() };
        assert_eq!(build_ranker(&config).name(), "decay");
    }
}
