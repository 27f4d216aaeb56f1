//! Date and quantity sanity checks shared by several record kinds

use chrono::NaiveDate;

use super::{AdvisoryKind, HookContext, RuleError};

/// A present value must be a finite number
pub fn check_finite(field: &str, value: Option<f64>) -> Result<(), RuleError> {
    match value {
        Some(v) if !v.is_finite() => Err(RuleError::NotFinite {
            field: field.to_string(),
            value: v,
        }),
        _ => Ok(()),
    }
}

/// Quantities may be zero but never negative
pub fn check_quantity(quantity: Option<f64>) -> Result<(), RuleError> {
    check_finite("Quantity", quantity)?;
    match quantity {
        Some(q) if q < 0.0 => Err(RuleError::NegativeQuantity { quantity: q }),
        _ => Ok(()),
    }
}

/// Expiry on the production date is allowed; before it is not
pub fn check_expiry(
    production: Option<NaiveDate>,
    expiry: Option<NaiveDate>,
) -> Result<(), RuleError> {
    if let (Some(production), Some(expiry)) = (production, expiry) {
        if expiry < production {
            return Err(RuleError::ExpiryBeforeProduction { production, expiry });
        }
    }
    Ok(())
}

/// Advise when a due date has already passed
pub fn advise_past_due(cx: &mut HookContext<'_>, due: Option<NaiveDate>) {
    if let Some(due) = due {
        if due < cx.today() {
            cx.advise(AdvisoryKind::PastDue, "Due Date is in the past");
        }
    }
}

/// Advise when work was completed before its target date
pub fn advise_completed_before_target(
    cx: &mut HookContext<'_>,
    target: Option<NaiveDate>,
    completion: Option<NaiveDate>,
) {
    if let (Some(target), Some(completion)) = (target, completion) {
        if completion < target {
            cx.advise(
                AdvisoryKind::CompletedBeforeTarget,
                "Completion Date is before Target Date",
            );
        }
    }
}

/// Advise when a value falls outside a pair of limits
pub fn advise_outside_limits(
    cx: &mut HookContext<'_>,
    value: Option<f64>,
    lower: Option<f64>,
    upper: Option<f64>,
) {
    if let (Some(value), Some(lower), Some(upper)) = (value, lower, upper) {
        if value > upper || value < lower {
            cx.advise(
                AdvisoryKind::OutsideLimits,
                format!(
                    "Value {} is outside control limits ({} - {})",
                    value, lower, upper
                ),
            );
        }
    }
}
