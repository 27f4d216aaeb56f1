//! CAPA entity type - SPC corrective action with action items

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::sanity::{advise_completed_before_target, advise_past_due};
use crate::rules::{HookContext, Hooks, RuleError};

/// Corrective action status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapaStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl std::fmt::Display for CapaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapaStatus::Open => write!(f, "open"),
            CapaStatus::InProgress => write!(f, "in_progress"),
            CapaStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for CapaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(CapaStatus::Open),
            "in_progress" | "inprogress" => Ok(CapaStatus::InProgress),
            "closed" => Ok(CapaStatus::Closed),
            _ => Err(format!(
                "Invalid CAPA status: {}. Use open, in_progress, or closed",
                s
            )),
        }
    }
}

/// One item of work within a corrective action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionItem {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
}

/// Corrective action raised from an alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capa {
    /// Unique identifier (CAPA-xxx)
    pub id: EntityId,

    pub title: String,

    /// Alert ID (ALRT-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,

    #[serde(default)]
    pub capa_status: CapaStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_items: Vec<ActionItem>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for Capa {
    const PREFIX: EntityPrefix = EntityPrefix::Capa;

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

impl Capa {
    pub fn new(title: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Capa),
            title,
            alert: None,
            capa_status: CapaStatus::Open,
            due_date: None,
            description: None,
            action_items: Vec::new(),
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }

    /// Number of action items with a completion date
    pub fn completed_items(&self) -> usize {
        self.action_items
            .iter()
            .filter(|item| item.completion_date.is_some())
            .count()
    }
}

impl Hooks for Capa {
    fn validate(&mut self, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        advise_past_due(cx, self.due_date);
        for item in &self.action_items {
            advise_completed_before_target(cx, item.target_date, item.completion_date);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::rules::{run_save_hooks, AdvisoryKind};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_past_due_is_advised() {
        let store = MemoryStore::new();
        let mut cx = HookContext::at(&store, Utc::now(), day("2024-04-10"));

        let mut capa = Capa::new("Recalibrate filler".to_string(), "qa".to_string());
        capa.due_date = Some(day("2024-04-01"));
        run_save_hooks(&mut capa, &mut cx).unwrap();

        assert_eq!(cx.advisories().len(), 1);
        assert_eq!(cx.advisories()[0].message, "Due Date is in the past");
    }

    #[test]
    fn test_item_completed_early_is_advised() {
        let store = MemoryStore::new();
        let mut cx = HookContext::at(&store, Utc::now(), day("2024-04-10"));

        let mut capa = Capa::new("Recalibrate filler".to_string(), "qa".to_string());
        capa.due_date = Some(day("2024-05-01"));
        capa.action_items = vec![
            ActionItem {
                description: "Order gauge".to_string(),
                target_date: Some(day("2024-04-20")),
                completion_date: Some(day("2024-04-08")),
                ..Default::default()
            },
            ActionItem {
                description: "Train operators".to_string(),
                target_date: Some(day("2024-04-20")),
                ..Default::default()
            },
        ];
        run_save_hooks(&mut capa, &mut cx).unwrap();

        assert_eq!(cx.advisories().len(), 1);
        assert_eq!(cx.advisories()[0].kind, AdvisoryKind::CompletedBeforeTarget);
        assert_eq!(capa.completed_items(), 1);
    }

    #[test]
    fn test_capa_deserialization() {
        let yaml = r#"
id: CAPA-01HC2JB7SMQX7RS1Y0GFKBHPTD
title: "Recalibrate filler"
due_date: 2024-05-01
action_items:
  - description: "Order gauge"
    target_date: 2024-04-20
created: 2024-04-01T10:00:00Z
author: qa
"#;
        let capa: Capa = serde_yml::from_str(yaml).unwrap();
        assert_eq!(capa.capa_status, CapaStatus::Open);
        assert_eq!(capa.action_items.len(), 1);
        assert_eq!(capa.due_date, Some(day("2024-05-01")));
    }
}
