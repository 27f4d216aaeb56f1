//! `sqt capa` command - Corrective actions

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{load_kind, load_record, open_project, opt, SaveSession};
use crate::cli::output::{col, field, finish_list, print_list, print_record, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::capa::{ActionItem, Capa, CapaStatus};

#[derive(Subcommand, Debug)]
pub enum CapaCommands {
    /// List corrective actions
    List(ListArgs),

    /// Create a new corrective action
    New(NewArgs),

    /// Show a corrective action's details
    Show(ShowArgs),

    /// Add an action item
    AddItem(AddItemArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status (open, in_progress, closed)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Show only corrective actions past their due date
    #[arg(long)]
    pub overdue: bool,

    #[command(flatten)]
    pub opts: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Title
    #[arg(long, short = 't')]
    pub title: String,

    /// Alert ID or short ID (ALRT@N)
    #[arg(long)]
    pub alert: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,

    /// Description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// CAPA ID or short ID (CAPA@N)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct AddItemArgs {
    /// CAPA ID or short ID (CAPA@N)
    pub capa: String,

    /// What needs to be done
    #[arg(long, short = 'd')]
    pub description: String,

    /// Person responsible
    #[arg(long, short = 'a')]
    pub assign: Option<String>,

    /// Target date (YYYY-MM-DD)
    #[arg(long)]
    pub target: Option<NaiveDate>,

    /// Completion date (YYYY-MM-DD)
    #[arg(long)]
    pub completed: Option<NaiveDate>,
}

impl ListRow for Capa {
    fn columns() -> Vec<Column> {
        vec![
            col("TITLE", 30),
            col("STATUS", 12),
            col("DUE", 10),
            col("ITEMS", 7),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.capa_status.to_string(),
            opt(&self.due_date),
            format!("{}/{}", self.completed_items(), self.action_items.len()),
        ]
    }
}

/// Run a CAPA subcommand
pub fn run(cmd: CapaCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CapaCommands::List(args) => run_list(args, global),
        CapaCommands::New(args) => run_new(args, global),
        CapaCommands::Show(args) => run_show(args, global),
        CapaCommands::AddItem(args) => run_add_item(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut capas: Vec<Capa> = load_kind(&project)?;

    if let Some(ref status) = args.status {
        let status: CapaStatus = status.parse().map_err(|e| miette::miette!("{}", e))?;
        capas.retain(|c| c.capa_status == status);
    }
    if args.overdue {
        let today = chrono::Local::now().date_naive();
        capas.retain(|c| c.capa_status != CapaStatus::Closed && c.due_date.is_some_and(|d| d < today));
    }

    let capas = finish_list(capas, &args.opts);
    print_list(&capas, &project, global, args.opts.count)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let mut capa = Capa::new(args.title, session.author());
    capa.alert = session.resolve_opt(EntityPrefix::Alrt, args.alert.as_deref())?;
    capa.due_date = args.due;
    capa.description = args.description;

    session.create(&mut capa, "corrective action")?;
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, capa) = load_record::<Capa>(&project, &args.id)?;

    print_record(&path, &capa, global, |c| {
        println!("{}: {}", style("Status").bold(), c.capa_status);
        field("Alert", &c.alert);
        field("Due Date", &c.due_date);
        field("Description", &c.description);

        if !c.action_items.is_empty() {
            println!();
            println!("{}:", style("Action Items").bold());
            for (i, item) in c.action_items.iter().enumerate() {
                let mark = if item.completion_date.is_some() {
                    style("✓").green()
                } else {
                    style("○").dim()
                };
                println!(
                    "  {} {}. {} {}",
                    mark,
                    i + 1,
                    item.description,
                    style(format!(
                        "[{} target {} done {}]",
                        item.assigned_to.as_deref().unwrap_or("-"),
                        item.target_date.map_or("-".to_string(), |d| d.to_string()),
                        item.completion_date.map_or("-".to_string(), |d| d.to_string()),
                    ))
                    .dim()
                );
            }
        }
    })
}

fn run_add_item(args: AddItemArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;
    let (_, mut capa) = load_record::<Capa>(session.project(), &args.capa)?;

    capa.action_items.push(ActionItem {
        description: args.description,
        assigned_to: args.assign,
        target_date: args.target,
        completion_date: args.completed,
    });
    if capa.capa_status == CapaStatus::Open {
        capa.capa_status = CapaStatus::InProgress;
    }
    capa.entity_revision += 1;

    let saved = session.save(&mut capa)?;
    println!(
        "{} Added action item {} to {}",
        style("✓").green(),
        capa.action_items.len(),
        style(&saved.short_id).cyan()
    );
    Ok(())
}
