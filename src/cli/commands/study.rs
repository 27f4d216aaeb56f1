//! `sqt study` command - Process capability studies

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{load_kind, load_record, open_project, opt, SaveSession};
use crate::cli::output::{col, field, finish_list, print_list, print_record, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::study::{CapabilityStudy, StudyDataPoint, StudyStatus};
use crate::entities::DataPoint;

#[derive(Subcommand, Debug)]
pub enum StudyCommands {
    /// List capability studies
    List(ListArgs),

    /// Create a new capability study
    New(NewArgs),

    /// Show a study's details
    Show(ShowArgs),

    /// Add a data point (or a bare value) to a study
    AddPoint(AddPointArgs),

    /// Mark a study as completed
    Complete(CompleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status (planned, in_progress, completed, cancelled)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    #[command(flatten)]
    pub opts: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Study title
    #[arg(long, short = 't')]
    pub title: String,

    /// Parameter ID or short ID (PARAM@N)
    #[arg(long, short = 'p')]
    pub parameter: Option<String>,

    /// Initial status
    #[arg(long, short = 's', default_value = "planned")]
    pub status: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Study ID or short ID (STUDY@N)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct AddPointArgs {
    /// Study ID or short ID (STUDY@N)
    pub study: String,

    /// Data point ID or short ID (DATA@N); its value is copied
    #[arg(long, short = 'd', required_unless_present = "value")]
    pub data: Option<String>,

    /// Value to add without a data point record
    #[arg(long, allow_hyphen_values = true, conflicts_with = "data")]
    pub value: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct CompleteArgs {
    /// Study ID or short ID (STUDY@N)
    pub study: String,

    /// Completion date (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl ListRow for CapabilityStudy {
    fn columns() -> Vec<Column> {
        vec![
            col("TITLE", 30),
            col("STATUS", 12),
            col("POINTS", 6),
            col("CP", 6),
            col("CPK", 6),
            col("COMPLETED", 10),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.study_status.to_string(),
            self.data_points.len().to_string(),
            opt(&self.cp_value),
            opt(&self.cpk_value),
            opt(&self.completion_date),
        ]
    }
}

/// Run a study subcommand
pub fn run(cmd: StudyCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        StudyCommands::List(args) => run_list(args, global),
        StudyCommands::New(args) => run_new(args, global),
        StudyCommands::Show(args) => run_show(args, global),
        StudyCommands::AddPoint(args) => run_add_point(args, global),
        StudyCommands::Complete(args) => run_complete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut studies: Vec<CapabilityStudy> = load_kind(&project)?;

    if let Some(ref status) = args.status {
        let status: StudyStatus = status.parse().map_err(|e| miette::miette!("{}", e))?;
        studies.retain(|s| s.study_status == status);
    }

    let studies = finish_list(studies, &args.opts);
    print_list(&studies, &project, global, args.opts.count)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let mut study = CapabilityStudy::new(args.title, session.author());
    study.parameter = session.resolve_opt(EntityPrefix::Param, args.parameter.as_deref())?;
    study.study_status = args.status.parse().map_err(|e| miette::miette!("{}", e))?;

    session.create(&mut study, "capability study")?;
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, study) = load_record::<CapabilityStudy>(&project, &args.id)?;

    print_record(&path, &study, global, |s| {
        field("Parameter", &s.parameter);
        println!("{}: {}", style("Status").bold(), s.study_status);
        field("Completion Date", &s.completion_date);
        print_indices(s);

        if !s.data_points.is_empty() {
            println!();
            println!("{} ({}):", style("Data Points").bold(), s.data_points.len());
            for dp in &s.data_points {
                println!(
                    "  {} {}",
                    style(opt(&dp.data_value)).yellow(),
                    style(dp.data_point.as_deref().unwrap_or("-")).dim()
                );
            }
        }
    })
}

fn run_add_point(args: AddPointArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;
    let (_, mut study) = load_record::<CapabilityStudy>(session.project(), &args.study)?;

    let entry = match args.data {
        Some(ref reference) => {
            let (_, point) = load_record::<DataPoint>(session.project(), reference)?;
            StudyDataPoint {
                data_point: Some(point.id.to_string()),
                data_value: Some(point.data_value),
            }
        }
        None => StudyDataPoint {
            data_point: None,
            data_value: args.value,
        },
    };

    study.data_points.push(entry);
    study.entity_revision += 1;
    let saved = session.save(&mut study)?;

    println!(
        "{} Added point to {} ({} point(s))",
        style("✓").green(),
        style(&saved.short_id).cyan(),
        study.data_points.len()
    );
    print_indices(&study);
    Ok(())
}

fn run_complete(args: CompleteArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;
    let (_, mut study) = load_record::<CapabilityStudy>(session.project(), &args.study)?;

    study.study_status = StudyStatus::Completed;
    if args.date.is_some() {
        study.completion_date = args.date;
    }
    study.entity_revision += 1;
    let saved = session.save(&mut study)?;

    println!(
        "{} Completed study {} on {}",
        style("✓").green(),
        style(&saved.short_id).cyan(),
        opt(&study.completion_date)
    );
    print_indices(&study);
    Ok(())
}

fn print_indices(study: &CapabilityStudy) {
    if let (Some(cp), Some(cpk)) = (study.cp_value, study.cpk_value) {
        println!(
            "{}: {}  {}: {}{}",
            style("Cp").bold(),
            cp,
            style("Cpk").bold(),
            cpk,
            if study.indices_are_placeholders {
                style(" (placeholder values)").dim().to_string()
            } else {
                String::new()
            }
        );
    }
}
