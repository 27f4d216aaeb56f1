//! DATA entity type - Process data point
//!
//! A single observation of a parameter. On save the value is assessed
//! against the parameter's spec limits and the result is stored in
//! `quality_status`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::sanity::check_finite;
use crate::rules::{
    assess, AdvisoryKind, Assessment, HookContext, Hooks, QualityStatus, RuleError,
};

/// One measured value of a parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    /// Unique identifier (DATA-xxx)
    pub id: EntityId,

    /// Parameter ID (PARAM-xxx)
    pub parameter: String,

    /// Measured value
    pub data_value: f64,

    /// When the value was taken; set on save when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Batch the value belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    /// Derived quality status
    #[serde(default)]
    pub quality_status: QualityStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for DataPoint {
    const PREFIX: EntityPrefix = EntityPrefix::Data;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.parameter
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl DataPoint {
    /// Create a new, not yet assessed data point
    pub fn new(parameter: String, data_value: f64, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Data),
            parameter,
            data_value,
            timestamp: None,
            batch_reference: None,
            operator: None,
            quality_status: QualityStatus::Pending,
            notes: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }

    /// Assess `data_value` against the parameter and store the result
    ///
    /// When the parameter has no complete pair of spec limits the current
    /// status is kept. A failed lookup yields `Unknown` plus an advisory.
    pub fn update_quality_status(&mut self, cx: &mut HookContext<'_>) {
        if self.parameter.trim().is_empty() {
            return;
        }

        match assess(cx.store(), &self.parameter, self.data_value) {
            Assessment::Classified(status) => {
                tracing::debug!(id = %self.id, %status, "classified data point");
                self.quality_status = status;
            }
            Assessment::NoLimits => {}
            Assessment::LookupFailed(reason) => {
                self.quality_status = QualityStatus::Unknown;
                cx.advise(
                    AdvisoryKind::LookupFailed,
                    format!("Quality status could not be assessed: {}", reason),
                );
            }
        }
    }
}

impl Hooks for DataPoint {
    fn validate(&mut self, _cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        check_finite("Data Value", Some(self.data_value))
    }

    fn before_save(&mut self, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        if self.timestamp.is_none() {
            self.timestamp = Some(cx.now());
        }
        self.update_quality_status(cx);
        Ok(())
    }
}
