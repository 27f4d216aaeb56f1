//! PARAM entity type - SPC parameter master with specification limits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::{check_limits, HookContext, Hooks, LimitKind, Limits, RuleError};

/// A measurable process parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Unique identifier (PARAM-xxx)
    pub id: EntityId,

    /// Parameter name, e.g. "Fill Volume"
    pub parameter_name: String,

    /// Measurement unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Upper specification limit (USL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_spec_limit: Option<f64>,

    /// Lower specification limit (LSL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_spec_limit: Option<f64>,

    /// Nominal target value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for Parameter {
    const PREFIX: EntityPrefix = EntityPrefix::Param;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.parameter_name
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Parameter {
    /// Create a new parameter without limits
    pub fn new(parameter_name: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Param),
            parameter_name,
            unit: None,
            upper_spec_limit: None,
            lower_spec_limit: None,
            target_value: None,
            description: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }

    pub fn limits(&self) -> Limits {
        Limits::new(self.upper_spec_limit, self.lower_spec_limit, None)
    }
}

impl Hooks for Parameter {
    fn validate(&mut self, _cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        check_limits(&self.limits(), LimitKind::Specification)
    }
}
