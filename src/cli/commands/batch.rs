//! `sqt batch` command - Production batches

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{load_kind, load_record, open_project, opt, resolve_id, SaveSession};
use crate::cli::output::{col, field, finish_list, print_list, print_record, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::batch::{generated_batch_id, Batch, BatchStatus};
use crate::entities::DataPoint;
use crate::rules::QualityStatus;

#[derive(Subcommand, Debug)]
pub enum BatchCommands {
    /// List batches
    List(ListArgs),

    /// Create a new batch
    New(NewArgs),

    /// Show a batch's details
    Show(ShowArgs),

    /// Record a data point against a batch
    DataPoint(DataPointArgs),

    /// Create several batches at once with generated batch numbers
    BulkCreate(BulkCreateArgs),

    /// Approve one or more batches
    Approve(ApproveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status (pending, approved, rejected)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Filter by item ID
    #[arg(long)]
    pub item: Option<String>,

    #[command(flatten)]
    pub opts: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Batch number
    #[arg(long, short = 'b')]
    pub batch_id: String,

    /// Item ID or short ID (ITEM@N)
    #[arg(long)]
    pub item: Option<String>,

    /// Production date (YYYY-MM-DD)
    #[arg(long)]
    pub production_date: Option<NaiveDate>,

    /// Expiry date (YYYY-MM-DD)
    #[arg(long)]
    pub expiry_date: Option<NaiveDate>,

    /// Quantity produced
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Batch ID or short ID (BATCH@N)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DataPointArgs {
    /// Batch ID or short ID (BATCH@N)
    pub batch: String,

    /// Parameter ID or short ID (PARAM@N)
    #[arg(long, short = 'p')]
    pub parameter: String,

    /// Measured value
    #[arg(long, allow_hyphen_values = true)]
    pub value: f64,

    /// Operator
    #[arg(long, short = 'o')]
    pub operator: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct BulkCreateArgs {
    /// Number of batches to create
    #[arg(long, short = 'n')]
    pub count: usize,

    /// Item ID or short ID (ITEM@N)
    #[arg(long)]
    pub item: Option<String>,

    /// Quantity for each batch
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct ApproveArgs {
    /// Batch IDs or short IDs (BATCH@N)
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl ListRow for Batch {
    fn columns() -> Vec<Column> {
        vec![
            col("BATCH", 24),
            col("ITEM", 20),
            col("PRODUCED", 10),
            col("EXPIRES", 10),
            col("QTY", 8),
            col("STATUS", 9),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.batch_id.clone(),
            self.item_name.clone().or_else(|| self.item_code.clone()).unwrap_or_default(),
            opt(&self.production_date),
            opt(&self.expiry_date),
            opt(&self.quantity),
            self.quality_status.to_string(),
        ]
    }
}

/// Run a batch subcommand
pub fn run(cmd: BatchCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        BatchCommands::List(args) => run_list(args, global),
        BatchCommands::New(args) => run_new(args, global),
        BatchCommands::Show(args) => run_show(args, global),
        BatchCommands::DataPoint(args) => run_data_point(args, global),
        BatchCommands::BulkCreate(args) => run_bulk_create(args, global),
        BatchCommands::Approve(args) => run_approve(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut batches: Vec<Batch> = load_kind(&project)?;

    if let Some(ref status) = args.status {
        let status: BatchStatus = status.parse().map_err(|e| miette::miette!("{}", e))?;
        batches.retain(|b| b.quality_status == status);
    }
    if let Some(ref item) = args.item {
        let item = resolve_id(&project, item)?;
        batches.retain(|b| b.item_code.as_deref().is_some_and(|c| c.contains(&item)));
    }

    let batches = finish_list(batches, &args.opts);
    print_list(&batches, &project, global, args.opts.count)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let mut batch = Batch::new(args.batch_id, session.author());
    batch.item_code = session.resolve_opt(EntityPrefix::Item, args.item.as_deref())?;
    batch.production_date = args.production_date;
    batch.expiry_date = args.expiry_date;
    batch.quantity = args.quantity;

    session.create(&mut batch, "batch")?;
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, batch) = load_record::<Batch>(&project, &args.id)?;

    print_record(&path, &batch, global, |b| {
        field("Item", &b.item_code);
        field("Item Name", &b.item_name);
        field("Production Date", &b.production_date);
        field("Expiry Date", &b.expiry_date);
        field("Quantity", &b.quantity);
        println!("{}: {}", style("Quality Status").bold(), b.quality_status);
    })
}

fn run_data_point(args: DataPointArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;
    let (_, batch) = load_record::<Batch>(session.project(), &args.batch)?;

    let parameter = session.resolve(EntityPrefix::Param, &args.parameter)?;
    let mut point = DataPoint::new(parameter, args.value, session.author());
    point.batch_reference = Some(batch.id.to_string());
    point.timestamp = Some(chrono::Utc::now());
    point.operator = args.operator;
    point.quality_status = QualityStatus::Pending;

    session.create(&mut point, "data point")?;
    if !global.quiet {
        println!(
            "   Batch: {} | Status: {}",
            style(&batch.batch_id).yellow(),
            point.quality_status
        );
    }
    Ok(())
}

fn run_bulk_create(args: BulkCreateArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;
    let today = Local::now().date_naive();
    let prefix = session.config().batch_prefix().to_string();
    let item = session.resolve_opt(EntityPrefix::Item, args.item.as_deref())?;

    let mut created = 0;
    for seq in 1..=args.count {
        let mut batch = Batch::new(generated_batch_id(&prefix, today, seq), session.author());
        batch.item_code = item.clone();
        batch.production_date = Some(today);
        batch.quantity = args.quantity;

        match session.save(&mut batch) {
            Ok(saved) => {
                created += 1;
                if global.verbose {
                    println!(
                        "{} {} {}",
                        style("✓").green(),
                        style(&saved.short_id).cyan(),
                        batch.batch_id
                    );
                }
            }
            Err(e) => {
                tracing::warn!(batch = %batch.batch_id, error = %e, "skipping batch");
                eprintln!("{} {}: {}", style("✗").red(), batch.batch_id, e);
            }
        }
    }

    println!(
        "{} Created {} of {} batch(es)",
        style("✓").green(),
        style(created).cyan(),
        args.count
    );
    Ok(())
}

fn run_approve(args: ApproveArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    if !args.yes {
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Approve {} batch(es)?", args.ids.len()))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let mut approved = 0;
    for reference in &args.ids {
        let mut batch = match load_record::<Batch>(session.project(), reference) {
            Ok((_, batch)) => batch,
            Err(e) => {
                eprintln!("{} {}: {}", style("✗").red(), reference, e);
                continue;
            }
        };

        batch.quality_status = BatchStatus::Approved;
        batch.entity_revision += 1;
        match session.save(&mut batch) {
            Ok(saved) => {
                approved += 1;
                println!(
                    "{} Approved {} ({})",
                    style("✓").green(),
                    style(&saved.short_id).cyan(),
                    batch.batch_id
                );
            }
            Err(e) => {
                tracing::warn!(batch = %batch.batch_id, error = %e, "approval failed");
                eprintln!("{} {}: {}", style("✗").red(), batch.batch_id, e);
            }
        }
    }

    println!(
        "{} Approved {} of {} batch(es)",
        style("✓").green(),
        style(approved).cyan(),
        args.ids.len()
    );
    Ok(())
}
