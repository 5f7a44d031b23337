//! Two-layer graph convolution ranker.
//!
//! Genes form a chain graph (each gene linked to its neighbour in input
//! order) with self-loops and symmetric normalisation,
//! `Â = D^-1/2 (A + I) D^-1/2`. Node features and weights are random but
//! drawn from a seedable RNG, so a configured seed makes ranking reproducible.
//!
//! `H1 = relu(Â (X W1 + b1))`, `s = Â (H1 W2 + b2)`, biases start at zero.

use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module};
use drugscout_common::config::RankerConfig;
use drugscout_common::RankedTarget;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::ranker::{sort_descending, DecayRanker, TargetRanker};

/// Width of the random node feature vectors.
const INPUT_DIM: usize = 16;

pub struct GraphRanker {
    hidden_dim: usize,
    seed: Option<u64>,
    device: Device,
}

impl GraphRanker {
    pub fn new(config: &RankerConfig) -> Self {
        Self {
            hidden_dim: config.hidden_dim.max(1),
            seed: config.seed,
            device: Device::Cpu,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Raw per-node scores in input order.
    pub fn forward(&self, n: usize) -> candle_core::Result<Vec<f64>> {
        let mut rng = self.rng();

        let adj = Tensor::from_vec(normalised_chain_adjacency(n), (n, n), &self.device)?;
        let x = uniform(&mut rng, (n, INPUT_DIM), 1.0, &self.device)?;

        let conv1 = glorot_linear(&mut rng, INPUT_DIM, self.hidden_dim, &self.device)?;
        let conv2 = glorot_linear(&mut rng, self.hidden_dim, 1, &self.device)?;

        let h1 = adj.matmul(&conv1.forward(&x)?)?.relu()?;
        let out = adj.matmul(&conv2.forward(&h1)?)?;

        let scores = out.squeeze(1)?.to_dtype(DType::F64)?.to_vec1::<f64>()?;
        Ok(scores)
    }
}

impl TargetRanker for GraphRanker {
    fn rank(&self, genes: &[String]) -> Vec<RankedTarget> {
        match genes.len() {
            0 => return vec![],
            1 => return vec![RankedTarget::new(genes[0].clone(), 1.0)],
            _ => {}
        }

        let scores = match self.forward(genes.len()) {
            Ok(scores) => scores.into_iter().map(|s| (s * 1000.0).round() / 1000.0).collect(),
            Err(e) => {
                warn!(error = %e, "GCN forward pass failed, using decay scores");
                DecayRanker::scores(genes.len())
            }
        };
        debug!(n = genes.len(), "Graph ranker scored genes");

        let ranked = genes
            .iter()
            .zip(scores)
            .map(|(g, s)| RankedTarget::new(g.clone(), s))
            .collect();
        sort_descending(ranked)
    }

    fn name(&self) -> &'static str {
        "graph"
    }
}

/// Row-major `D^-1/2 (A + I) D^-1/2` for a path graph over `n` nodes.
fn normalised_chain_adjacency(n: usize) -> Vec<f32> {
    let degree = |i: usize| -> f32 {
        let neighbours = usize::from(i > 0) + usize::from(i + 1 < n);
        (neighbours + 1) as f32
    };

    let mut adj = vec![0f32; n * n];
    for i in 0..n {
        for j in i.saturating_sub(1)..(i + 2).min(n) {
            adj[i * n + j] = 1.0 / (degree(i) * degree(j)).sqrt();
        }
    }
    adj
}

fn uniform(
    rng: &mut StdRng,
    shape: (usize, usize),
    limit: f32,
    device: &Device,
) -> candle_core::Result<Tensor> {
    let data: Vec<f32> = (0..shape.0 * shape.1).map(|_| rng.gen_range(-limit..limit)).collect();
    Tensor::from_vec(data, shape, device)
}

/// Glorot-uniform weight `(out, in)` with a zero bias.
fn glorot_linear(
    rng: &mut StdRng,
    in_dim: usize,
    out_dim: usize,
    device: &Device,
) -> candle_core::Result<Linear> {
    let limit = (6.0 / (in_dim + out_dim) as f32).sqrt();
    let weight = uniform(rng, (out_dim, in_dim), limit, device)?;
    let bias = Tensor::zeros(out_dim, DType::F32, device)?;
    Ok(Linear::new(weight, Some(bias)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ranker(seed: Option<u64>) -> GraphRanker {
        GraphRanker::new(&RankerConfig { seed, ..Default::default() })
    }

    fn genes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_adjacency_is_symmetric_with_self_loops() {
        let adj = normalised_chain_adjacency(3);
        // degrees: 2, 3, 2
        assert!((adj[0] - 0.5).abs() < 1e-6);
        assert!((adj[1] - 1.0 / 6f32.sqrt()).abs() < 1e-6);
        assert_eq!(adj[2], 0.0);
        assert_eq!(adj[1], adj[3]);
        assert!((adj[4] - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_gene_scores_one() {
        assert_eq!(ranker(None).rank(&genes(&["HTT"])), vec![RankedTarget::new("HTT", 1.0)]);
        assert!(ranker(None).rank(&[]).is_empty());
    }

    #[test]
    fn test_one_score_per_gene_sorted_descending() {
        let input = genes(&["APP", "PSEN1", "PSEN2", "BACE1", "MAPT"]);
        let ranked = ranker(Some(11)).rank(&input);

        assert_eq!(ranked.len(), input.len());
        assert!(ranked.iter().all(|r| r.score.is_finite()));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));

        let mut seen: Vec<_> = ranked.iter().map(|r| r.gene.clone()).collect();
        seen.sort();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_seeded_ranking_is_reproducible() {
        let input = genes(&["SNCA", "LRRK2", "GBA"]);
        assert_eq!(ranker(Some(5)).rank(&input), ranker(Some(5)).rank(&input));
    }
}
