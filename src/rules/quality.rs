//! Quality-status assessment of process data points
//!
//! A measured value is classified against the spec limits of its parameter:
//!
//! ```text
//!   LSL        LSL+m                  USL-m        USL
//!    |  Warning  |        Normal        |  Warning  |
//! Critical                                       Critical
//! ```
//!
//! where `m` is 10% of the spec width.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::identity::EntityPrefix;
use crate::core::store::RecordStore;

/// Fraction of the spec width treated as the warning band at each bound
pub const WARNING_MARGIN_RATIO: f64 = 0.1;

/// Derived quality status of a data point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityStatus {
    /// Not yet assessed
    #[default]
    Pending,
    Normal,
    Warning,
    Critical,
    /// The parameter lookup failed, so the value could not be classified
    Unknown,
}

impl QualityStatus {
    pub fn all() -> &'static [QualityStatus] {
        &[
            QualityStatus::Pending,
            QualityStatus::Normal,
            QualityStatus::Warning,
            QualityStatus::Critical,
            QualityStatus::Unknown,
        ]
    }
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityStatus::Pending => write!(f, "pending"),
            QualityStatus::Normal => write!(f, "normal"),
            QualityStatus::Warning => write!(f, "warning"),
            QualityStatus::Critical => write!(f, "critical"),
            QualityStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for QualityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(QualityStatus::Pending),
            "normal" => Ok(QualityStatus::Normal),
            "warning" => Ok(QualityStatus::Warning),
            "critical" => Ok(QualityStatus::Critical),
            "unknown" => Ok(QualityStatus::Unknown),
            _ => Err(format!(
                "Invalid quality status: {}. Use pending, normal, warning, critical, or unknown",
                s
            )),
        }
    }
}

/// A pair of spec limits, both present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecLimits {
    pub lower: f64,
    pub upper: f64,
}

impl SpecLimits {
    /// Build from optional limits; `None` unless both are present
    pub fn from_options(lower: Option<f64>, upper: Option<f64>) -> Option<Self> {
        match (lower, upper) {
            (Some(lower), Some(upper)) => Some(Self { lower, upper }),
            _ => None,
        }
    }

    /// Width of the warning band at each bound
    pub fn warning_margin(&self) -> f64 {
        (self.upper - self.lower) * WARNING_MARGIN_RATIO
    }
}

/// Outcome of assessing a value through a parameter lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    /// The value was classified against the parameter's spec limits
    Classified(QualityStatus),
    /// The parameter exists but does not define both spec limits
    NoLimits,
    /// The parameter could not be read
    LookupFailed(String),
}

/// Classify a value against spec limits
///
/// A non-finite value or limit falls in no band and yields `Unknown`.
pub fn classify(value: f64, limits: SpecLimits) -> QualityStatus {
    if !(value.is_finite() && limits.lower.is_finite() && limits.upper.is_finite()) {
        return QualityStatus::Unknown;
    }
    let margin = limits.warning_margin();

    if value > limits.upper || value < limits.lower {
        QualityStatus::Critical
    } else if value > limits.upper - margin || value < limits.lower + margin {
        QualityStatus::Warning
    } else {
        QualityStatus::Normal
    }
}

/// Look up a parameter's spec limits and classify a value against them
pub fn assess(store: &dyn RecordStore, parameter: &str, value: f64) -> Assessment {
    let doc = match store.get_doc(EntityPrefix::Param, parameter) {
        Ok(doc) => doc,
        Err(e) => return Assessment::LookupFailed(e.to_string()),
    };

    let limit = |field: &str| -> Result<Option<f64>, String> {
        match doc.get(field) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| format!("parameter '{}' has a non-numeric {}", parameter, field)),
        }
    };

    let (lower, upper) = match (limit("lower_spec_limit"), limit("upper_spec_limit")) {
        (Ok(lower), Ok(upper)) => (lower, upper),
        (Err(e), _) | (_, Err(e)) => return Assessment::LookupFailed(e),
    };

    match SpecLimits::from_options(lower, upper) {
        Some(limits) => Assessment::Classified(classify(value, limits)),
        None => Assessment::NoLimits,
    }
}
