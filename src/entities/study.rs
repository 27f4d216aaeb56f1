//! STUDY entity type - Process capability study

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{default_revision, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::rules::capability::placeholder_indices;
use crate::rules::{HookContext, Hooks, RuleError};

/// Study lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for StudyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudyStatus::Planned => write!(f, "planned"),
            StudyStatus::InProgress => write!(f, "in_progress"),
            StudyStatus::Completed => write!(f, "completed"),
            StudyStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for StudyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(StudyStatus::Planned),
            "in_progress" | "inprogress" => Ok(StudyStatus::InProgress),
            "completed" => Ok(StudyStatus::Completed),
            "cancelled" | "canceled" => Ok(StudyStatus::Cancelled),
            _ => Err(format!(
                "Invalid study status: {}. Use planned, in_progress, completed, or cancelled",
                s
            )),
        }
    }
}

/// A data point included in a study
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyDataPoint {
    /// Data point ID (DATA-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_point: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_value: Option<f64>,
}

/// Process capability study
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityStudy {
    /// Unique identifier (STUDY-xxx)
    pub id: EntityId,

    /// Descriptive title
    pub title: String,

    /// Parameter ID (PARAM-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,

    #[serde(default)]
    pub study_status: StudyStatus,

    /// Set on save when the study is completed without a date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_points: Vec<StudyDataPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpk_value: Option<f64>,

    /// True when cp/cpk are fixed stand-ins rather than computed values
    #[serde(default)]
    pub indices_are_placeholders: bool,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Entity revision number
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for CapabilityStudy {
    const PREFIX: EntityPrefix = EntityPrefix::Study;

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

impl CapabilityStudy {
    /// Create a new planned study
    pub fn new(title: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Study),
            title,
            parameter: None,
            study_status: StudyStatus::Planned,
            completion_date: None,
            data_points: Vec::new(),
            cp_value: None,
            cpk_value: None,
            indices_are_placeholders: false,
            created: Utc::now(),
            author,
            entity_revision: 1,
        }
    }

    fn set_completion_date(&mut self, today: NaiveDate) {
        if self.study_status == StudyStatus::Completed && self.completion_date.is_none() {
            self.completion_date = Some(today);
        }
    }

    fn assign_capability_indices(&mut self) {
        let values = self.data_points.iter().map(|dp| dp.data_value);
        if let Some(indices) = placeholder_indices(values) {
            self.cp_value = Some(indices.cp);
            self.cpk_value = Some(indices.cpk);
            self.indices_are_placeholders = true;
        }
    }
}

impl Hooks for CapabilityStudy {
    fn validate(&mut self, cx: &mut HookContext<'_>) -> Result<(), RuleError> {
        self.set_completion_date(cx.today());
        self.assign_capability_indices();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::rules::{run_save_hooks, PLACEHOLDER_CP, PLACEHOLDER_CPK};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn point(value: Option<f64>) -> StudyDataPoint {
        StudyDataPoint {
            data_point: None,
            data_value: value,
        }
    }

    #[test]
    fn test_completion_date_set_when_completed() {
        let store = MemoryStore::new();
        let mut cx = HookContext::at(&store, Utc::now(), day("2024-06-03"));

        let mut study = CapabilityStudy::new("Line 2 fill".to_string(), "qa".to_string());
        study.study_status = StudyStatus::Completed;
        run_save_hooks(&mut study, &mut cx).unwrap();
        assert_eq!(study.completion_date, Some(day("2024-06-03")));
    }

    #[test]
    fn test_existing_completion_date_kept() {
        let store = MemoryStore::new();
        let mut cx = HookContext::at(&store, Utc::now(), day("2024-06-03"));

        let mut study = CapabilityStudy::new("Line 2 fill".to_string(), "qa".to_string());
        study.study_status = StudyStatus::Completed;
        study.completion_date = Some(day("2024-05-30"));
        run_save_hooks(&mut study, &mut cx).unwrap();
        assert_eq!(study.completion_date, Some(day("2024-05-30")));
    }

    #[test]
    fn test_in_progress_has_no_completion_date() {
        let store = MemoryStore::new();
        let mut cx = HookContext::new(&store);
        let mut study = CapabilityStudy::new("Line 2 fill".to_string(), "qa".to_string());
        study.study_status = StudyStatus::InProgress;
        run_save_hooks(&mut study, &mut cx).unwrap();
        assert!(study.completion_date.is_none());
    }

    #[test]
    fn test_placeholder_indices_need_two_values() {
        let store = MemoryStore::new();
        let mut cx = HookContext::new(&store);

        let mut study = CapabilityStudy::new("Torque".to_string(), "qa".to_string());
        study.data_points = vec![point(Some(4.1)), point(None)];
        run_save_hooks(&mut study, &mut cx).unwrap();
        assert!(study.cp_value.is_none());
        assert!(!study.indices_are_placeholders);

        study.data_points.push(point(Some(4.3)));
        run_save_hooks(&mut study, &mut cx).unwrap();
        assert_eq!(study.cp_value, Some(PLACEHOLDER_CP));
        assert_eq!(study.cpk_value, Some(PLACEHOLDER_CPK));
        assert!(study.indices_are_placeholders);
    }

    #[test]
    fn test_study_status_parsing() {
        assert_eq!("completed".parse::<StudyStatus>().unwrap(), StudyStatus::Completed);
        assert_eq!("canceled".parse::<StudyStatus>().unwrap(), StudyStatus::Cancelled);
        assert!("done".parse::<StudyStatus>().is_err());
    }
}
