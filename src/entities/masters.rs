//! ITEM and EMP entity types - master records referenced for display names

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::Hooks;

/// Item (product or material) master
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (ITEM-xxx)
    pub id: EntityId,

    pub item_name: String,

    /// Stock unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for Item {
    const PREFIX: EntityPrefix = EntityPrefix::Item;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.item_name
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Item {
    pub fn new(item_name: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Item),
            item_name,
            uom: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }
}

impl Hooks for Item {}

/// Employee master
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier (EMP-xxx)
    pub id: EntityId,

    pub employee_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for Employee {
    const PREFIX: EntityPrefix = EntityPrefix::Emp;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.employee_name
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Employee {
    pub fn new(employee_name: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Emp),
            employee_name,
            department: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }
}

impl Hooks for Employee {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_ids() {
        let item = Item::new("Amber Vial".to_string(), "qa".to_string());
        let emp = Employee::new("Dana Ortiz".to_string(), "hr".to_string());
        assert!(item.id.to_string().starts_with("ITEM-"));
        assert!(emp.id.to_string().starts_with("EMP-"));
        assert_eq!(emp.title(), "Dana Ortiz");
    }

    #[test]
    fn test_item_serialization_skips_empty() {
        let item = Item::new("Amber Vial".to_string(), "qa".to_string());
        let yaml = serde_yml::to_string(&item).unwrap();
        assert!(yaml.contains("item_name: Amber Vial"));
        assert!(!yaml.contains("uom"));
    }
}
