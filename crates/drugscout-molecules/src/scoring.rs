//! Composite candidate scoring.
//!
//! `final = round(0.4·qsar + 0.3·admet + 0.3·affinity, 3)`, clamped to [0, 1],
//! where `affinity = 1 / (1 + activity_value)` with activity in nM.

use std::sync::Mutex;

use drugscout_common::config::ScoringConfig;
use drugscout_common::{Candidate, CandidateSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::admet::admet_for;
use crate::aggregator::{CandidateInput, CandidateOrigin};
use crate::qsar::qsar_score;

pub const QSAR_WEIGHT: f64 = 0.4;
pub const ADMET_WEIGHT: f64 = 0.3;
pub const AFFINITY_WEIGHT: f64 = 0.3;

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Lower potency values give a higher term, bounded in (0, 1].
/// Negative values are treated as 0.
pub fn affinity_term(activity_value: f64) -> f64 {
    1.0 / (1.0 + activity_value.max(0.0))
}

/// Weighted sum of the three sub-scores, rounded then clamped.
pub fn composite(qsar: f64, admet: f64, affinity: f64) -> f64 {
    let raw = QSAR_WEIGHT * qsar + ADMET_WEIGHT * admet + AFFINITY_WEIGHT * affinity;
    round_to(raw, 3).clamp(0.0, 1.0)
}

/// Scores candidates. The QSAR sub-score carries symmetric jitter drawn from
/// an owned RNG; a zero amplitude makes scoring exact.
pub struct Scorer {
    jitter_amplitude: f64,
    rng: Mutex<StdRng>,
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { jitter_amplitude: config.jitter_amplitude.max(0.0), rng: Mutex::new(rng) }
    }

    pub fn seeded(jitter_amplitude: f64, seed: u64) -> Self {
        Self::new(&ScoringConfig { jitter_amplitude, seed: Some(seed) })
    }

    /// No jitter at all.
    pub fn deterministic() -> Self {
        Self::seeded(0.0, 0)
    }

    fn jitter(&self) -> f64 {
        if self.jitter_amplitude == 0.0 {
            return 0.0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(-self.jitter_amplitude..=self.jitter_amplitude)
    }

    /// Score one aggregated candidate.
    pub fn score(&self, input: &CandidateInput) -> Candidate {
        let (qsar, admet, source) = match input.origin {
            CandidateOrigin::Bioactivity => (
                qsar_score(&input.descriptors, self.jitter()),
                admet_for(&input.descriptors),
                CandidateSource::Bioactivity,
            ),
            CandidateOrigin::Synthetic { qsar, admet } => (qsar, admet, CandidateSource::Synthetic),
        };

        Candidate {
            name: input.name.clone(),
            activity_type: input.activity_type.clone(),
            activity_value: input.activity_value,
            activity_units: input.activity_units.clone(),
            activity: input.activity_label(),
            admet_score: admet,
            qsar_score: qsar,
            final_score: composite(qsar, admet, affinity_term(input.activity_value)),
            source,
        }
    }

    /// Score a batch, preserving order.
    pub fn score_all(&self, inputs: &[CandidateInput]) -> Vec<Candidate> {
        inputs.iter().map(|i| self.score(i)).collect()
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::Descriptors;
    use pretty_assertions::assert_eq;

    fn bioactivity(value: f64, descriptors: Descriptors) -> CandidateInput {
        CandidateInput {
            name: "CHEMBL25".into(),
            activity_type: "IC50".into(),
            activity_value: value,
            activity_units: "nM".into(),
            descriptors,
            origin: CandidateOrigin::Bioactivity,
        }
    }

    #[test]
    fn test_affinity_term() {
        assert_eq!(affinity_term(0.0), 1.0);
        assert_eq!(affinity_term(-5.0), 1.0);
        assert!((affinity_term(1000.0) - 1.0 / 1001.0).abs() < 1e-12);
        assert!(affinity_term(10.0) > affinity_term(100.0));
    }

    #[test]
    fn test_composite_is_clamped() {
        assert_eq!(composite(1.0, 1.0, 1.0), 1.0);
        assert_eq!(composite(5.0, 5.0, 5.0), 1.0);
        assert_eq!(composite(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_reference_molecule_within_jitter_band() {
        let scorer = Scorer::seeded(0.05, 42);
        let c = scorer.score(&bioactivity(1000.0, Descriptors::default()));
        assert_eq!(c.admet_score, 0.7);
        let expected = 0.4 * 0.9 + 0.3 * 0.7 + 0.3 / 1001.0;
        assert!((c.final_score - expected).abs() <= 0.05, "{} vs {}", c.final_score, expected);
        assert!((0.3..=1.0).contains(&c.qsar_score));
        assert_eq!(c.activity, "IC50 1000 nM");
        assert_eq!(c.source, CandidateSource::Bioactivity);
    }

    #[test]
    fn test_deterministic_scorer_is_exact() {
        let scorer = Scorer::deterministic();
        let c = scorer.score(&bioactivity(1000.0, Descriptors::default()));
        assert_eq!(c.qsar_score, 0.9);
        assert_eq!(c.final_score, 0.57);
    }

    #[test]
    fn test_same_seed_same_scores() {
        let input = bioactivity(12.0, Descriptors { mw: 410.0, ..Default::default() });
        let a = Scorer::seeded(0.05, 7).score(&input);
        let b = Scorer::seeded(0.05, 7).score(&input);
        assert_eq!(a, b);
    }

    #[test]
    fn test_repeated_scoring_stays_in_band() {
        let scorer = Scorer::seeded(0.05, 1);
        let input = bioactivity(50.0, Descriptors::default());
        for _ in 0..200 {
            let c = scorer.score(&input);
            assert!((0.85..=0.95).contains(&c.qsar_score));
            assert!((0.0..=1.0).contains(&c.final_score));
        }
    }

    #[test]
    fn test_synthetic_candidates_use_fixed_subscores() {
        let scorer = Scorer::seeded(0.05, 3);
        let input = CandidateInput::synthetic("SOD1", 0);
        let c = scorer.score(&input);
        assert_eq!(c.qsar_score, 0.85);
        assert_eq!(c.admet_score, 0.55);
        assert_eq!(c.final_score, 0.506);
        assert_eq!(c.source, CandidateSource::Synthetic);
    }
}
