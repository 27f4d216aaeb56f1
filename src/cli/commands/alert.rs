//! `sqt alert` command - SPC alerts

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{load_kind, load_record, open_project, opt, SaveSession};
use crate::cli::output::{col, field, finish_list, print_list, print_record, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::alert::{Alert, AlertStatus, Severity};

#[derive(Subcommand, Debug)]
pub enum AlertCommands {
    /// List alerts
    List(ListArgs),

    /// Raise a new alert
    New(NewArgs),

    /// Show an alert's details
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by severity (low, medium, high, critical)
    #[arg(long)]
    pub severity: Option<String>,

    /// Filter by status (open, acknowledged, resolved)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Show only alerts without an assignee
    #[arg(long)]
    pub unassigned: bool,

    #[command(flatten)]
    pub opts: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Alert title
    #[arg(long, short = 't')]
    pub title: String,

    /// Severity (low, medium, high, critical)
    #[arg(long, short = 'S', default_value = "medium")]
    pub severity: String,

    /// Person responsible
    #[arg(long, short = 'a')]
    pub assign: Option<String>,

    /// Parameter ID or short ID (PARAM@N)
    #[arg(long, short = 'p')]
    pub parameter: Option<String>,

    /// Data point ID or short ID (DATA@N)
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Alert ID or short ID (ALRT@N)
    pub id: String,
}

impl ListRow for Alert {
    fn columns() -> Vec<Column> {
        vec![
            col("TITLE", 30),
            col("SEVERITY", 9),
            col("STATUS", 12),
            col("ASSIGNED", 16),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.severity.to_string(),
            self.alert_status.to_string(),
            opt(&self.assigned_to),
        ]
    }
}

/// Run an alert subcommand
pub fn run(cmd: AlertCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        AlertCommands::List(args) => run_list(args, global),
        AlertCommands::New(args) => run_new(args, global),
        AlertCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut alerts: Vec<Alert> = load_kind(&project)?;

    if let Some(ref severity) = args.severity {
        let severity: Severity = severity.parse().map_err(|e| miette::miette!("{}", e))?;
        alerts.retain(|a| a.severity == severity);
    }
    if let Some(ref status) = args.status {
        let status: AlertStatus = status.parse().map_err(|e| miette::miette!("{}", e))?;
        alerts.retain(|a| a.alert_status == status);
    }
    if args.unassigned {
        alerts.retain(|a| a.assigned_to.as_deref().map_or(true, |s| s.trim().is_empty()));
    }

    let alerts = finish_list(alerts, &args.opts);
    print_list(&alerts, &project, global, args.opts.count)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let severity: Severity = args.severity.parse().map_err(|e| miette::miette!("{}", e))?;
    let mut alert = Alert::new(args.title, severity, session.author());
    alert.assigned_to = args.assign;
    alert.parameter = session.resolve_opt(EntityPrefix::Param, args.parameter.as_deref())?;
    alert.data_point = session.resolve_opt(EntityPrefix::Data, args.data.as_deref())?;
    alert.description = args.description;

    session.create(&mut alert, "alert")?;
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, alert) = load_record::<Alert>(&project, &args.id)?;

    print_record(&path, &alert, global, |a| {
        let severity = match a.severity {
            Severity::Critical => style(a.severity).red().bold(),
            Severity::High => style(a.severity).red(),
            Severity::Medium => style(a.severity).yellow(),
            Severity::Low => style(a.severity).dim(),
        };
        println!("{}: {}", style("Severity").bold(), severity);
        println!("{}: {}", style("Status").bold(), a.alert_status);
        field("Assigned To", &a.assigned_to);
        field("Parameter", &a.parameter);
        field("Data Point", &a.data_point);
        field("Description", &a.description);
    })
}
