//! Notification context and rendering
//!
//! Each [`NotificationKind`] owns exactly one default (subject, message)
//! pair. [`get_context`] fills those defaults into whatever context the
//! caller supplies; [`NotificationRenderer`] turns a context into the
//! Markdown body using the embedded Tera template.

use chrono::Utc;
use rust_embed::Embed;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use tera::Tera;
use thiserror::Error;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const NOTIFICATION_TEMPLATE: &str = "notification.md.tera";

/// Kinds of notification sent for SPC records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    AlertNew,
    AlertEscalation,
    ReportGenerated,
    CapabilityStudyCompleted,
    CorrectiveActionNew,
    CorrectiveActionDueReminder,
}

impl NotificationKind {
    pub fn all() -> &'static [NotificationKind] {
        &[
            NotificationKind::AlertNew,
            NotificationKind::AlertEscalation,
            NotificationKind::ReportGenerated,
            NotificationKind::CapabilityStudyCompleted,
            NotificationKind::CorrectiveActionNew,
            NotificationKind::CorrectiveActionDueReminder,
        ]
    }

    /// Default (subject, message) pair
    pub fn template(&self) -> (&'static str, &'static str) {
        match self {
            NotificationKind::AlertNew => (
                "New SPC Alert Created",
                "A new SPC quality alert has been triggered.",
            ),
            NotificationKind::AlertEscalation => (
                "SPC Alert Escalation",
                "An SPC alert has been escalated.",
            ),
            NotificationKind::ReportGenerated => (
                "SPC Report Generated",
                "An SPC report has been generated.",
            ),
            NotificationKind::CapabilityStudyCompleted => (
                "Process Capability Study Completed",
                "A process capability study has been completed.",
            ),
            NotificationKind::CorrectiveActionNew => (
                "New Corrective Action Created",
                "A new corrective action has been created and requires attention.",
            ),
            NotificationKind::CorrectiveActionDueReminder => (
                "Corrective Action Due Reminder",
                "A corrective action is due soon and requires attention.",
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::AlertNew => "alert_new",
            NotificationKind::AlertEscalation => "alert_escalation",
            NotificationKind::ReportGenerated => "report_generated",
            NotificationKind::CapabilityStudyCompleted => "capability_study_completed",
            NotificationKind::CorrectiveActionNew => "corrective_action_new",
            NotificationKind::CorrectiveActionDueReminder => "corrective_action_due_reminder",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "alert_new" => Ok(NotificationKind::AlertNew),
            "alert_escalation" => Ok(NotificationKind::AlertEscalation),
            "report_generated" => Ok(NotificationKind::ReportGenerated),
            "capability_study_completed" | "process_capability" => {
                Ok(NotificationKind::CapabilityStudyCompleted)
            }
            "corrective_action_new" => Ok(NotificationKind::CorrectiveActionNew),
            "corrective_action_due_reminder" => Ok(NotificationKind::CorrectiveActionDueReminder),
            _ => Err(format!(
                "Invalid notification kind: {}. Use one of: {}",
                s,
                NotificationKind::all()
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// Build a notification context with guaranteed `subject` and `message`
///
/// A non-object input is discarded. Keys the caller already set to a
/// non-blank string are kept; missing, null, or blank ones get the kind's
/// defaults.
pub fn get_context(kind: NotificationKind, input: JsonValue) -> Map<String, JsonValue> {
    let mut context = match input {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    };

    let (subject, message) = kind.template();
    set_default(&mut context, "subject", subject);
    set_default(&mut context, "message", message);
    context
}

fn set_default(context: &mut Map<String, JsonValue>, key: &str, default: &str) {
    let keep = matches!(context.get(key), Some(JsonValue::String(s)) if !s.trim().is_empty());
    if !keep {
        context.insert(key.to_string(), JsonValue::String(default.to_string()));
    }
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

#[derive(Serialize)]
struct FieldRow {
    name: String,
    value: String,
}

/// Renders notification bodies from the embedded template
pub struct NotificationRenderer {
    tera: Tera,
}

impl NotificationRenderer {
    /// Create a renderer with the embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        if !tera.get_template_names().any(|n| n == NOTIFICATION_TEMPLATE) {
            return Err(TemplateError::NotFound(NOTIFICATION_TEMPLATE.to_string()));
        }

        Ok(Self { tera })
    }

    /// Render a notification; `record` fields are listed below the message
    pub fn render(
        &self,
        kind: NotificationKind,
        context: &Map<String, JsonValue>,
        record: Option<&JsonValue>,
    ) -> Result<String, TemplateError> {
        let text = |key: &str| {
            context
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let fields: Vec<FieldRow> = record
            .and_then(|r| r.as_object())
            .map(|obj| {
                obj.iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| FieldRow {
                        name: k.clone(),
                        value: scalar_text(v),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut ctx = tera::Context::new();
        ctx.insert("subject", &text("subject"));
        ctx.insert("message", &text("message"));
        ctx.insert("kind", kind.as_str());
        ctx.insert("fields", &fields);
        ctx.insert("generated", &Utc::now().format("%Y-%m-%d %H:%M UTC").to_string());

        self.tera
            .render(NOTIFICATION_TEMPLATE, &ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(_) | JsonValue::Bool(_) => value.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_input_gets_defaults_for_every_kind() {
        for kind in NotificationKind::all() {
            let ctx = get_context(*kind, json!({}));
            assert!(!ctx["subject"].as_str().unwrap().is_empty());
            assert!(!ctx["message"].as_str().unwrap().is_empty());
        }
    }

    #[test]
    fn test_non_object_input_is_replaced() {
        let ctx = get_context(NotificationKind::ReportGenerated, json!("not a map"));
        assert_eq!(ctx["subject"], "SPC Report Generated");
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_existing_values_are_kept() {
        let ctx = get_context(
            NotificationKind::AlertNew,
            json!({"subject": "pH excursion on line 3", "doc": "ALRT-1"}),
        );
        assert_eq!(ctx["subject"], "pH excursion on line 3");
        assert_eq!(ctx["message"], "A new SPC quality alert has been triggered.");
        assert_eq!(ctx["doc"], "ALRT-1");
    }

    #[test]
    fn test_blank_values_are_replaced() {
        let ctx = get_context(
            NotificationKind::CorrectiveActionDueReminder,
            json!({"subject": "  ", "message": null}),
        );
        assert_eq!(ctx["subject"], "Corrective Action Due Reminder");
        assert_eq!(
            ctx["message"],
            "A corrective action is due soon and requires attention."
        );
    }

    #[test]
    fn test_kinds_have_distinct_subjects() {
        let mut subjects: Vec<&str> = NotificationKind::all().iter().map(|k| k.template().0).collect();
        subjects.sort();
        subjects.dedup();
        assert_eq!(subjects.len(), NotificationKind::all().len());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(
            "process_capability".parse::<NotificationKind>().unwrap(),
            NotificationKind::CapabilityStudyCompleted
        );
        assert_eq!(
            "alert-escalation".parse::<NotificationKind>().unwrap(),
            NotificationKind::AlertEscalation
        );
        assert!("nope".parse::<NotificationKind>().is_err());
    }

    #[test]
    fn test_render_includes_record_fields() {
        let renderer = NotificationRenderer::new().unwrap();
        let ctx = get_context(NotificationKind::AlertNew, json!({}));
        let record = json!({"severity": "high", "assigned_to": null, "value": 20.5});

        let body = renderer
            .render(NotificationKind::AlertNew, &ctx, Some(&record))
            .unwrap();
        assert!(body.starts_with("# New SPC Alert Created"));
        assert!(body.contains("| severity | high |"));
        assert!(body.contains("| value | 20.5 |"));
        assert!(!body.contains("assigned_to"));
    }

    #[test]
    fn test_render_without_record() {
        let renderer = NotificationRenderer::new().unwrap();
        let ctx = get_context(NotificationKind::ReportGenerated, json!({}));

        let body = renderer.render(NotificationKind::ReportGenerated, &ctx, None).unwrap();
        assert!(body.contains("An SPC report has been generated."));
        assert!(!body.contains("| Field | Value |"));
        assert!(body.contains("report_generated"));
    }
}
