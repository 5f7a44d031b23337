//! QSAR proxy score.
//!
//! Penalty model: start from 1.0, subtract weighted relative deviations of
//! molecular weight and logP from drug-like ideals, then clamp.

use crate::coerce::Descriptors;

pub const IDEAL_MW: f64 = 350.0;
pub const IDEAL_LOGP: f64 = 2.5;

const MW_PENALTY: f64 = 0.4;
const LOGP_PENALTY: f64 = 0.3;

/// Clamp range of the penalty model before jitter.
pub const BASE_FLOOR: f64 = 0.3;
pub const BASE_CEILING: f64 = 0.9;

/// Clamp range of the published score.
pub const SCORE_FLOOR: f64 = 0.3;
pub const SCORE_CEILING: f64 = 1.0;

/// Noise-free score in [0.3, 0.9].
pub fn base_score(d: &Descriptors) -> f64 {
    let penalty = MW_PENALTY * (d.mw - IDEAL_MW).abs() / IDEAL_MW
        + LOGP_PENALTY * (d.logp - IDEAL_LOGP).abs() / IDEAL_LOGP;
    (1.0 - penalty).clamp(BASE_FLOOR, BASE_CEILING)
}

/// Base score plus `jitter`, clamped to [0.3, 1.0] and rounded to 3 places.
pub fn qsar_score(d: &Descriptors, jitter: f64) -> f64 {
    crate::scoring::round_to((base_score(d) + jitter).clamp(SCORE_FLOOR, SCORE_CEILING), 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_molecule_hits_ceiling() {
        assert_eq!(base_score(&Descriptors::default()), BASE_CEILING);
    }

    #[test]
    fn test_penalty_is_monotonic_in_mw_deviation() {
        let near = Descriptors { mw: 400.0, ..Default::default() };
        let far = Descriptors { mw: 600.0, ..Default::default() };
        // 1 - 0.4 * 250/350 = 0.714
        assert!((base_score(&far) - 0.714).abs() < 1e-3);
        assert!(base_score(&near) >= base_score(&far));
    }

    #[test]
    fn test_extreme_molecule_hits_floor() {
        let d = Descriptors { mw: 1200.0, logp: 9.0, ..Default::default() };
        assert_eq!(base_score(&d), BASE_FLOOR);
        assert_eq!(qsar_score(&d, -0.05), SCORE_FLOOR);
    }

    #[test]
    fn test_jitter_is_added_and_clamped() {
        let d = Descriptors::default();
        assert_eq!(qsar_score(&d, 0.0), 0.9);
        assert_eq!(qsar_score(&d, 0.04), 0.94);
        assert_eq!(qsar_score(&d, 0.5), SCORE_CEILING);
    }
}
