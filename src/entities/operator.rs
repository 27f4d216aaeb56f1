//! OPR entity type - Shop-floor operator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::{fill_from_reference, HookContext, Hooks, RuleError};

/// Shop-floor operator linked to an employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    /// Unique identifier (OPR-xxx)
    pub id: EntityId,

    /// Badge or operator code
    pub operator_code: String,

    /// Employee ID (EMP-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,

    /// Copied from the employee on save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for Operator {
    const PREFIX: EntityPrefix = EntityPrefix::Opr;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.operator_code
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Operator {
    pub fn new(operator_code: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Opr),
            operator_code,
            employee: None,
            employee_name: None,
            shift: None,
            skill_level: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }
}

impl Hooks for Operator {
    fn validate(&mut self, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        cx.operator_settings().validate()
    }

    fn before_save(&mut self, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        fill_from_reference(
            cx.store(),
            &mut self.employee_name,
            self.employee.as_deref(),
            EntityPrefix::Emp,
            "employee_name",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OperatorSettings;
    use crate::core::store::MemoryStore;
    use crate::rules::run_save_hooks;
    use serde_json::json;

    #[test]
    fn test_employee_name_populated() {
        let mut store = MemoryStore::new();
        store.insert(EntityPrefix::Emp, "EMP-7", json!({"employee_name": "Dana Ortiz"}));
        let mut cx = HookContext::new(&store);

        let mut opr = Operator::new("OP-114".to_string(), "hr".to_string());
        opr.employee = Some("EMP-7".to_string());
        run_save_hooks(&mut opr, &mut cx).unwrap();
        assert_eq!(opr.employee_name.as_deref(), Some("Dana Ortiz"));
    }

    #[test]
    fn test_missing_employee_leaves_name_blank() {
        let store = MemoryStore::new();
        let mut cx = HookContext::new(&store);

        let mut opr = Operator::new("OP-114".to_string(), "hr".to_string());
        opr.employee = Some("EMP-404".to_string());
        run_save_hooks(&mut opr, &mut cx).unwrap();
        assert!(opr.employee_name.is_none());
    }

    #[test]
    fn test_invalid_settings_block_save() {
        let store = MemoryStore::new();
        let settings = OperatorSettings {
            default_shift_hours: Some(0.0),
            max_operators_per_shift: None,
        };
        let mut cx = HookContext::new(&store).with_operator_settings(settings);

        let mut opr = Operator::new("OP-114".to_string(), "hr".to_string());
        let err = run_save_hooks(&mut opr, &mut cx).unwrap_err();
        assert_eq!(err.to_string(), "Default Shift Hours must be greater than 0");
    }
}
