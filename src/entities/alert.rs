//! ALRT entity type - SPC alert

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, is_blank, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::{AdvisoryKind, HookContext, Hooks, RuleError};

/// Alert severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    /// High and Critical alerts need someone assigned
    pub fn needs_assignee(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!(
                "Invalid severity: {}. Use low, medium, high, or critical",
                s
            )),
        }
    }
}

/// Alert workflow status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    #[default]
    Open,
    Acknowledged,
    Resolved,
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertStatus::Open => write!(f, "open"),
            AlertStatus::Acknowledged => write!(f, "acknowledged"),
            AlertStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl std::str::FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(AlertStatus::Open),
            "acknowledged" | "ack" => Ok(AlertStatus::Acknowledged),
            "resolved" => Ok(AlertStatus::Resolved),
            _ => Err(format!(
                "Invalid alert status: {}. Use open, acknowledged, or resolved",
                s
            )),
        }
    }
}

/// Quality alert raised against a parameter or data point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Unique identifier (ALRT-xxx)
    pub id: EntityId,

    pub title: String,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    #[serde(default)]
    pub alert_status: AlertStatus,

    /// Parameter ID (PARAM-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,

    /// Data point ID (DATA-xxx) that triggered the alert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_point: Option<String>,

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

impl Entity for Alert {
    const PREFIX: EntityPrefix = EntityPrefix::Alrt;

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

impl Alert {
    pub fn new(title: String, severity: Severity, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Alrt),
            title,
            severity,
            assigned_to: None,
            alert_status: AlertStatus::Open,
            parameter: None,
            data_point: None,
            description: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }
}

impl Hooks for Alert {
    fn validate(&mut self, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        if self.severity.needs_assignee() && is_blank(self.assigned_to.as_deref()) {
            cx.advise(
                AdvisoryKind::Unassigned,
                "High severity alert - please assign to appropriate personnel",
            );
        }
        Ok(())
    }
}
