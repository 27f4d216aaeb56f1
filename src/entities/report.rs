//! RPT entity type - SPC report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, is_blank, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::{HookContext, Hooks, RuleError};

/// Generated SPC report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier (RPT-xxx)
    pub id: EntityId,

    /// Generated on save as "{report_type} Report - {time_period}"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_name: Option<String>,

    /// e.g. "Weekly", "Capability"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,

    /// e.g. "2024-W14"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,

    /// Parameter ID (PARAM-xxx) the report covers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for Report {
    const PREFIX: EntityPrefix = EntityPrefix::Rpt;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        self.report_name.as_deref().unwrap_or_default()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Report {
    pub fn new(author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Rpt),
            report_name: None,
            report_type: None,
            time_period: None,
            parameter: None,
            summary: None,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }
}

impl Hooks for Report {
    fn before_save(&mut self, _cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        if !is_blank(self.report_name.as_deref()) {
            return Ok(());
        }
        if let (Some(report_type), Some(time_period)) = (&self.report_type, &self.time_period) {
            if !report_type.trim().is_empty() && !time_period.trim().is_empty() {
                self.report_name = Some(format!("{} Report - {}", report_type, time_period));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::rules::run_save_hooks;

    #[test]
    fn test_report_name_generated() {
        let store = MemoryStore::new();
        let mut cx = HookContext::new(&store);

        let mut report = Report::new("qa".to_string());
        report.report_type = Some("Weekly".to_string());
        report.time_period = Some("2024-W14".to_string());
        run_save_hooks(&mut report, &mut cx).unwrap();
        assert_eq!(report.title(), "Weekly Report - 2024-W14");
    }

    #[test]
    fn test_report_name_needs_both_inputs() {
        let store = MemoryStore::new();
        let mut cx = HookContext::new(&store);

        let mut report = Report::new("qa".to_string());
        report.report_type = Some("Weekly".to_string());
        run_save_hooks(&mut report, &mut cx).unwrap();
        assert!(report.report_name.is_none());
    }

    #[test]
    fn test_explicit_report_name_kept() {
        let store = MemoryStore::new();
        let mut cx = HookContext::new(&store);

        let mut report = Report::new("qa".to_string());
        report.report_name = Some("Q1 filler review".to_string());
        report.report_type = Some("Weekly".to_string());
        report.time_period = Some("2024-W14".to_string());
        run_save_hooks(&mut report, &mut cx).unwrap();
        assert_eq!(report.title(), "Q1 filler review");
    }
}
