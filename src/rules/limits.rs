//! Limit ordering checks shared by parameter masters and control charts

use serde::{Deserialize, Serialize};
use std::fmt;

use super::sanity::check_finite;
use super::RuleError;

/// Which family of limits is being checked; only affects messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    /// Engineering/customer specification limits (USL/LSL)
    Specification,
    /// Statistically derived control limits (UCL/LCL)
    Control,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitKind::Specification => write!(f, "Specification Limit"),
            LimitKind::Control => write!(f, "Control Limit"),
        }
    }
}

/// Up to three optional limit values of one record
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Limits {
    pub upper: Option<f64>,
    pub lower: Option<f64>,
    pub center: Option<f64>,
}

impl Limits {
    pub fn new(upper: Option<f64>, lower: Option<f64>, center: Option<f64>) -> Self {
        Self {
            upper,
            lower,
            center,
        }
    }
}

/// Reject non-finite values, inverted limits and a center line outside them
///
/// Each comparison only runs when both of its operands are present. The
/// check is pure, so running it again on a valid record is a no-op.
pub fn check_limits(limits: &Limits, kind: LimitKind) -> Result<(), RuleError> {
    check_finite(&format!("Upper {}", kind), limits.upper)?;
    check_finite(&format!("Lower {}", kind), limits.lower)?;
    check_finite("Center Line", limits.center)?;

    if let (Some(upper), Some(lower)) = (limits.upper, limits.lower) {
        if upper <= lower {
            return Err(RuleError::LimitOrder { kind, upper, lower });
        }
    }

    if let Some(center) = limits.center {
        if let Some(upper) = limits.upper {
            if center > upper {
                return Err(RuleError::CenterAboveUpper {
                    kind,
                    center,
                    upper,
                });
            }
        }
        if let Some(lower) = limits.lower {
            if center < lower {
                return Err(RuleError::CenterBelowLower {
                    kind,
                    center,
                    lower,
                });
            }
        }
    }

    Ok(())
}
