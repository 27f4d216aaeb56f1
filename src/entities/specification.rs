//! PSPEC entity type - Parameter specification for a product or customer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::{fill_from_reference, HookContext, Hooks, RuleError};

/// Parameter specification in a product/customer context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpecification {
    /// Unique identifier (PSPEC-xxx)
    pub id: EntityId,

    pub title: String,

    /// Parameter ID (PARAM-xxx)
    pub parameter: String,

    /// Copied from the parameter on save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,

    /// Item ID (ITEM-xxx) the specification applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

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

impl Entity for ParameterSpecification {
    const PREFIX: EntityPrefix = EntityPrefix::Pspec;

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

impl ParameterSpecification {
    pub fn new(title: String, parameter: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Pspec),
            title,
            parameter,
            parameter_name: None,
            product: None,
            customer: None,
            notes: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }
}

impl Hooks for ParameterSpecification {
    fn before_save(&mut self, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        fill_from_reference(
            cx.store(),
            &mut self.parameter_name,
            Some(self.parameter.as_str()),
            EntityPrefix::Param,
            "parameter_name",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::rules::run_save_hooks;
    use serde_json::json;

    #[test]
    fn test_parameter_name_populated() {
        let mut store = MemoryStore::new();
        store.insert(EntityPrefix::Param, "PARAM-PH", json!({"parameter_name": "pH"}));
        let mut cx = HookContext::new(&store);

        let mut spec = ParameterSpecification::new(
            "pH for ACME".to_string(),
            "PARAM-PH".to_string(),
            "qa".to_string(),
        );
        spec.customer = Some("ACME".to_string());
        run_save_hooks(&mut spec, &mut cx).unwrap();
        assert_eq!(spec.parameter_name.as_deref(), Some("pH"));
    }
}
