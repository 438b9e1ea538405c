//! GHI classification thresholds.

use serde::{Deserialize, Serialize};

/// Low/high GHI bounds. Always `low <= high`; the constructor and the
/// deserializer both reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

#[derive(Deserialize)]
struct RawThresholds {
    low: f64,
    high: f64,
}

impl TryFrom<RawThresholds> for Thresholds {
    type Error = String;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Thresholds::new(raw.low, raw.high)
    }
}

impl Thresholds {
    pub fn new(low: f64, high: f64) -> Result<Self, String> {
        if !low.is_finite() || !high.is_finite() {
            return Err(format!("thresholds must be finite (low={low}, high={high})"));
        }
        if low > high {
            return Err(format!("low threshold {low} exceeds high threshold {high}"));
        }
        Ok(Self { low, high })
    }

    /// Classify a GHI value.
    ///
    /// `value >= high` is positive, `low <= value < high` is a warning and
    /// anything below `low` is negative.
    pub fn classify(&self, value: f64) -> GhiClass {
        if value >= self.high {
            GhiClass::Positive
        } else if value >= self.low {
            GhiClass::Warning
        } else {
            GhiClass::Negative
        }
    }
}

/// Three-way GHI classification shared by the map and the prediction result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GhiClass {
    Negative,
    Warning,
    Positive,
}

impl GhiClass {
    /// Circle fill colour on the map.
    pub fn color(&self) -> &'static str {
        match self {
            GhiClass::Positive => "#28a745",
            GhiClass::Warning => "#ffc107",
            GhiClass::Negative => "#dc3545",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GhiClass::Positive => "High GHI",
            GhiClass::Warning => "Moderate GHI",
            GhiClass::Negative => "Low GHI",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> Thresholds {
        Thresholds::new(300.0, 600.0).unwrap()
    }

    #[test]
    fn value_at_high_is_positive() {
        assert_eq!(thresholds().classify(600.0), GhiClass::Positive);
    }

    #[test]
    fn value_at_low_is_warning() {
        assert_eq!(thresholds().classify(300.0), GhiClass::Warning);
    }

    #[test]
    fn values_around_bounds() {
        let t = thresholds();
        assert_eq!(t.classify(600.01), GhiClass::Positive);
        assert_eq!(t.classify(599.99), GhiClass::Warning);
        assert_eq!(t.classify(450.0), GhiClass::Warning);
        assert_eq!(t.classify(299.99), GhiClass::Negative);
    }

    #[test]
    fn boundary_values_at_backend_thresholds() {
        let t = Thresholds::new(250.0, 640.0).unwrap();
        assert_eq!(t.classify(640.0), GhiClass::Positive);
        assert_eq!(t.classify(639.999), GhiClass::Warning);
        assert_eq!(t.classify(250.0), GhiClass::Warning);
        assert_eq!(t.classify(249.999), GhiClass::Negative);
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let t = Thresholds::new(5.0, 5.0).unwrap();
        assert_eq!(t.classify(5.0), GhiClass::Positive);
        assert_eq!(t.classify(4.9), GhiClass::Negative);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert!(Thresholds::new(700.0, 600.0).is_err());
        assert!(serde_json::from_str::<Thresholds>(r#"{"low": 700, "high": 600}"#).is_err());
    }

    #[test]
    fn deserializes_backend_payload() {
        let t: Thresholds = serde_json::from_str(r#"{"low": 12.5, "high": 640.25}"#).unwrap();
        assert_eq!(t, Thresholds::new(12.5, 640.25).unwrap());
    }
}
