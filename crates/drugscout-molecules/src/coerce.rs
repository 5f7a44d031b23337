//! Best-effort numeric coercion for loosely typed oracle payloads.

use drugscout_common::RawHit;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read a number or numeric string, substituting `default` on anything else.
/// Non-finite results also fall back.
pub fn coerce_f64(value: Option<&Value>, default: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(default)
}

/// First non-blank string among `candidates`.
pub fn first_non_blank<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Molecular descriptors consumed by the QSAR and ADMET models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Descriptors {
    pub mw: f64,
    pub logp: f64,
    pub hbd: f64,
    pub hba: f64,
    pub tpsa: f64,
}

impl Default for Descriptors {
    /// A drug-like reference molecule: no penalty in either model.
    fn default() -> Self {
        Self { mw: 350.0, logp: 2.5, hbd: 1.0, hba: 5.0, tpsa: 75.0 }
    }
}

impl Descriptors {
    /// Descriptors reported alongside a hit, defaulted field by field.
    pub fn from_hit(hit: &RawHit) -> Self {
        let d = Self::default();
        Self {
            mw: coerce_f64(hit.mw.as_ref(), d.mw),
            logp: coerce_f64(hit.logp.as_ref(), d.logp),
            hbd: coerce_f64(hit.hbd.as_ref(), d.hbd),
            hba: coerce_f64(hit.hba.as_ref(), d.hba),
            tpsa: coerce_f64(hit.tpsa.as_ref(), d.tpsa),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64(Some(&json!(12.5)), 0.0), 12.5);
        assert_eq!(coerce_f64(Some(&json!(" 40 ")), 0.0), 40.0);
        assert_eq!(coerce_f64(Some(&json!("n/a")), 1000.0), 1000.0);
        assert_eq!(coerce_f64(Some(&json!("NaN")), 7.0), 7.0);
        assert_eq!(coerce_f64(Some(&Value::Null), 350.0), 350.0);
        assert_eq!(coerce_f64(None, 2.5), 2.5);
    }

    #[test]
    fn test_first_non_blank() {
        assert_eq!(first_non_blank([None, Some("  "), Some("CHEMBL25")]), Some("CHEMBL25"));
        assert_eq!(first_non_blank([None, None]), None);
    }

    #[test]
    fn test_descriptors_from_partial_hit() {
        let hit: RawHit = serde_json::from_value(json!({"MW": "480.2", "LogP": null, "TPSA": 90})).unwrap();
        let d = Descriptors::from_hit(&hit);
        assert_eq!(d, Descriptors { mw: 480.2, logp: 2.5, hbd: 1.0, hba: 5.0, tpsa: 90.0 });
    }
}
