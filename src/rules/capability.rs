//! Capability-index placeholder
//!
//! Studies with enough data get fixed Cp/Cpk values. These are stand-ins,
//! not statistics: no mean, sigma, or spec width is involved, and the
//! record is flagged so nothing downstream mistakes them for measured
//! capability.

use serde::{Deserialize, Serialize};

/// Placeholder Cp assigned to studies with enough data
pub const PLACEHOLDER_CP: f64 = 1.5;

/// Placeholder Cpk assigned to studies with enough data
pub const PLACEHOLDER_CPK: f64 = 1.3;

/// Minimum number of data values before indices are assigned
pub const MIN_DATA_VALUES: usize = 2;

/// A Cp/Cpk pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityIndices {
    pub cp: f64,
    pub cpk: f64,
}

impl CapabilityIndices {
    pub fn placeholder() -> Self {
        Self {
            cp: PLACEHOLDER_CP,
            cpk: PLACEHOLDER_CPK,
        }
    }
}

/// Placeholder indices when at least two values are present
pub fn placeholder_indices<I>(values: I) -> Option<CapabilityIndices>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let present = values.into_iter().flatten().count();
    (present >= MIN_DATA_VALUES).then(CapabilityIndices::placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_indices_below_two_values() {
        assert_eq!(placeholder_indices(Vec::<Option<f64>>::new()), None);
        assert_eq!(placeholder_indices(vec![Some(4.2)]), None);
        assert_eq!(placeholder_indices(vec![Some(4.2), None, None]), None);
    }

    #[test]
    fn test_constants_with_two_values() {
        let indices = placeholder_indices(vec![Some(4.2), Some(0.0)]).unwrap();
        assert_eq!(indices.cp, 1.5);
        assert_eq!(indices.cpk, 1.3);
    }

    #[test]
    fn test_values_do_not_affect_result() {
        let a = placeholder_indices(vec![Some(1.0), Some(1.0)]);
        let b = placeholder_indices(vec![Some(-50.0), Some(900.0), Some(3.0)]);
        assert_eq!(a, b);
    }
}
