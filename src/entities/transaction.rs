//! TXN entity type - Shop-floor transaction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::sanity::check_quantity;
use crate::rules::{HookContext, Hooks, RuleError};

/// A material movement or work report on the shop floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (TXN-xxx)
    pub id: EntityId,

    /// Short description, e.g. "Issue to line 2"
    pub title: String,

    /// Free-form type such as "issue", "receipt", "scrap"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,

    /// Batch ID (BATCH-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,

    /// Operator ID (OPR-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    /// Set on save when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_time: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for Transaction {
    const PREFIX: EntityPrefix = EntityPrefix::Txn;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Transaction {
    pub fn new(title: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Txn),
            title,
            transaction_type: None,
            batch: None,
            operator: None,
            quantity: None,
            transaction_time: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }
}

impl Hooks for Transaction {
    fn validate(&mut self, _cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        check_quantity(self.quantity)
    }

    fn before_save(&mut self, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        if self.transaction_time.is_none() {
            self.transaction_time = Some(cx.now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::rules::run_save_hooks;
    use chrono::TimeZone;

    #[test]
    fn test_transaction_time_defaults() {
        let store = MemoryStore::new();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 14, 0, 0).unwrap();
        let mut cx = HookContext::at(&store, now, now.date_naive());

        let mut txn = Transaction::new("Issue to line 2".to_string(), "op".to_string());
        run_save_hooks(&mut txn, &mut cx).unwrap();
        assert_eq!(txn.transaction_time, Some(now));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let store = MemoryStore::new();
        let mut cx = HookContext::new(&store);

        let mut txn = Transaction::new("Scrap".to_string(), "op".to_string());
        txn.quantity = Some(-3.0);
        let err = run_save_hooks(&mut txn, &mut cx).unwrap_err();
        assert_eq!(err.to_string(), "Quantity cannot be negative");
        assert!(txn.transaction_time.is_none());
    }
}
