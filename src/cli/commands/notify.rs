//! `sqt notify` command - Render a notification

use clap::ValueEnum;
use miette::Result;
use serde_json::{Map, Value as JsonValue};

use crate::cli::helpers::{open_project, resolve_id};
use crate::cli::GlobalOpts;
use crate::core::identity::EntityPrefix;
use crate::core::store::{ProjectStore, RecordStore};
use crate::rules::{get_context, NotificationKind, NotificationRenderer};

#[derive(clap::Args, Debug)]
pub struct NotifyArgs {
    /// Notification kind
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Record the notification is about (ID or short ID)
    #[arg(long, short = 'r')]
    pub record: Option<String>,

    /// Override the default subject
    #[arg(long)]
    pub subject: Option<String>,

    /// Override the default message
    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    AlertNew,
    AlertEscalation,
    ReportGenerated,
    #[value(alias = "process-capability")]
    CapabilityStudyCompleted,
    CorrectiveActionNew,
    CorrectiveActionDueReminder,
}

impl From<KindArg> for NotificationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::AlertNew => NotificationKind::AlertNew,
            KindArg::AlertEscalation => NotificationKind::AlertEscalation,
            KindArg::ReportGenerated => NotificationKind::ReportGenerated,
            KindArg::CapabilityStudyCompleted => NotificationKind::CapabilityStudyCompleted,
            KindArg::CorrectiveActionNew => NotificationKind::CorrectiveActionNew,
            KindArg::CorrectiveActionDueReminder => NotificationKind::CorrectiveActionDueReminder,
        }
    }
}

pub fn run(args: NotifyArgs, global: &GlobalOpts) -> Result<()> {
    let kind = NotificationKind::from(args.kind);

    let record = match args.record {
        Some(ref reference) => Some(load_record_doc(reference, global)?),
        None => None,
    };

    let mut input = Map::new();
    if let Some(subject) = args.subject {
        input.insert("subject".to_string(), JsonValue::String(subject));
    }
    if let Some(message) = args.message {
        input.insert("message".to_string(), JsonValue::String(message));
    }

    let context = get_context(kind, JsonValue::Object(input));
    let renderer = NotificationRenderer::new().map_err(|e| miette::miette!("{}", e))?;
    let body = renderer
        .render(kind, &context, record.as_ref())
        .map_err(|e| miette::miette!("{}", e))?;

    print!("{}", body);
    Ok(())
}

fn load_record_doc(reference: &str, global: &GlobalOpts) -> Result<JsonValue> {
    let project = open_project(global)?;
    let id = resolve_id(&project, reference)?;
    let prefix = EntityPrefix::from_filename(&id)
        .ok_or_else(|| miette::miette!("Cannot tell the record kind of '{}'", reference))?;

    let store = ProjectStore::new(project);
    store.get_doc(prefix, &id).map_err(|e| miette::miette!("{}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_an_argument() {
        let args = KindArg::value_variants();
        assert_eq!(args.len(), NotificationKind::all().len());
        for arg in args {
            let kind = NotificationKind::from(*arg);
            let name = arg.to_possible_value().map(|v| v.get_name().to_string());
            assert_eq!(name.as_deref(), Some(kind.as_str().replace('_', "-").as_str()));
        }
    }
}
