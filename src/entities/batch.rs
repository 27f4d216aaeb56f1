//! BATCH entity type - Production batch

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::sanity::{check_expiry, check_quantity};
use crate::rules::{fill_from_reference, HookContext, Hooks, RuleError};

/// Batch release status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchStatus::Pending => write!(f, "pending"),
            BatchStatus::Approved => write!(f, "approved"),
            BatchStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for BatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BatchStatus::Pending),
            "approved" => Ok(BatchStatus::Approved),
            "rejected" => Ok(BatchStatus::Rejected),
            _ => Err(format!(
                "Invalid batch status: {}. Use pending, approved, or rejected",
                s
            )),
        }
    }
}

/// Production batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Unique identifier (BATCH-xxx)
    pub id: EntityId,

    /// User-facing batch number, e.g. BATCH-2024-01-10-001
    pub batch_id: String,

    /// Item ID (ITEM-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,

    /// Copied from the item on save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default)]
    pub quality_status: BatchStatus,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for Batch {
    const PREFIX: EntityPrefix = EntityPrefix::Batch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.batch_id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Batch {
    /// Create a new pending batch
    pub fn new(batch_id: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Batch),
            batch_id,
            item_code: None,
            item_name: None,
            production_date: None,
            expiry_date: None,
            quantity: None,
            quality_status: BatchStatus::Pending,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }
}

impl Hooks for Batch {
    fn validate(&mut self, _cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        check_expiry(self.production_date, self.expiry_date)?;
        check_quantity(self.quantity)
    }

    fn before_save(&mut self, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        fill_from_reference(
            cx.store(),
            &mut self.item_name,
            self.item_code.as_deref(),
            EntityPrefix::Item,
            "item_name",
        );
        Ok(())
    }
}

/// Batch number generated for bulk creation: `{prefix}-{date}-{seq:03}`
pub fn generated_batch_id(prefix: &str, date: NaiveDate, seq: usize) -> String {
    format!("{}-{}-{:03}", prefix, date.format("%Y-%m-%d"), seq)
}
