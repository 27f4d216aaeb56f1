//! HIST entity type - Batch processing history entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::sanity::{advise_outside_limits, check_finite};
use crate::rules::{HookContext, Hooks, RuleError};

/// A recorded process value for a batch, with the limits in force at the time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchHistory {
    /// Unique identifier (HIST-xxx)
    pub id: EntityId,

    /// Batch ID (BATCH-xxx)
    pub batch: String,

    /// Parameter ID (PARAM-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_limit: Option<f64>,

    /// Processing step or stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for BatchHistory {
    const PREFIX: EntityPrefix = EntityPrefix::Hist;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.batch
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl BatchHistory {
    pub fn new(batch: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Hist),
            batch,
            parameter: None,
            actual_value: None,
            upper_limit: None,
            lower_limit: None,
            step: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }
}

impl Hooks for BatchHistory {
    fn validate(&mut self, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        check_finite("Actual Value", self.actual_value)?;
        check_finite("Upper Limit", self.upper_limit)?;
        check_finite("Lower Limit", self.lower_limit)?;
        advise_outside_limits(cx, self.actual_value, self.lower_limit, self.upper_limit);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::rules::run_save_hooks;

    #[test]
    fn test_out_of_limit_value_is_advised_not_blocked() {
        let store = MemoryStore::new();
        let mut cx = HookContext::new(&store);

        let mut hist = BatchHistory::new("BATCH-1".to_string(), "op".to_string());
        hist.actual_value = Some(42.5);
        hist.lower_limit = Some(30.0);
        hist.upper_limit = Some(40.0);
        assert!(run_save_hooks(&mut hist, &mut cx).is_ok());
        assert_eq!(
            cx.advisories()[0].message,
            "Value 42.5 is outside control limits (30 - 40)"
        );
    }

    #[test]
    fn test_partial_limits_are_quiet() {
        let store = MemoryStore::new();
        let mut cx = HookContext::new(&store);

        let mut hist = BatchHistory::new("BATCH-1".to_string(), "op".to_string());
        hist.actual_value = Some(42.5);
        hist.upper_limit = Some(40.0);
        run_save_hooks(&mut hist, &mut cx).unwrap();
        assert!(cx.advisories().is_empty());
    }

    #[test]
    fn test_nan_value_is_rejected() {
        let store = MemoryStore::new();
        let mut cx = HookContext::new(&store);

        let mut hist = BatchHistory::new("BATCH-1".to_string(), "op".to_string());
        hist.actual_value = Some(f64::NAN);
        hist.lower_limit = Some(30.0);
        hist.upper_limit = Some(40.0);
        let err = run_save_hooks(&mut hist, &mut cx).unwrap_err();
        assert!(matches!(err, RuleError::NotFinite { .. }));
    }
}
