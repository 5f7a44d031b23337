//! ADMET proxy score from molecular weight and logP.

use crate::coerce::Descriptors;
use crate::qsar::{IDEAL_LOGP, IDEAL_MW};

pub const ADMET_FLOOR: f64 = 0.45;
pub const ADMET_CEILING: f64 = 0.75;

const BASELINE: f64 = 0.7;

/// Deterministic score in [0.45, 0.75], rounded to 2 places.
pub fn admet_score(mw: f64, logp: f64) -> f64 {
    let raw = BASELINE - (mw - IDEAL_MW).abs() / 700.0 - (logp - IDEAL_LOGP).abs() / 6.0;
    crate::scoring::round_to(raw.clamp(ADMET_FLOOR, ADMET_CEILING), 2)
}

pub fn admet_for(d: &Descriptors) -> f64 {
    admet_score(d.mw, d.logp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admet_reference_molecule() {
        assert_eq!(admet_for(&Descriptors::default()), 0.7);
    }

    #[test]
    fn test_admet_penalties() {
        // 0.7 - 70/700 - 0 = 0.6
        assert_eq!(admet_score(420.0, 2.5), 0.6);
        // 0.7 - 0 - 1.5/6 = 0.45
        assert_eq!(admet_score(350.0, 4.0), 0.45);
    }

    #[test]
    fn test_admet_is_bounded() {
        for (mw, logp) in [(0.0, -10.0), (2000.0, 12.0), (350.0, 2.5), (180.16, 1.2)] {
            let s = admet_score(mw, logp);
            assert!((ADMET_FLOOR..=ADMET_CEILING).contains(&s), "{s} out of range");
        }
    }
}
