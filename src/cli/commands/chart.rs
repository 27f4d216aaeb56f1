//! `sqt chart` command - Control chart definitions

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{load_kind, load_record, open_project, opt, resolve_id, SaveSession};
use crate::cli::output::{col, field, finish_list, print_list, print_record, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::chart::{ChartType, ControlChart};

#[derive(Subcommand, Debug)]
pub enum ChartCommands {
    /// List control charts
    List(ListArgs),

    /// Create a new control chart
    New(NewArgs),

    /// Show a control chart's details
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by parameter ID
    #[arg(long, short = 'p')]
    pub parameter: Option<String>,

    #[command(flatten)]
    pub opts: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Parameter ID or short ID (PARAM@N)
    #[arg(long, short = 'p')]
    pub parameter: String,

    /// Chart title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Chart type (x-bar/r, x-bar/s, imr, p, np, c, u)
    #[arg(long, short = 'T', default_value = "x-bar/r")]
    pub r#type: String,

    /// Upper control limit
    #[arg(long, allow_hyphen_values = true)]
    pub ucl: Option<f64>,

    /// Lower control limit
    #[arg(long, allow_hyphen_values = true)]
    pub lcl: Option<f64>,

    /// Center line
    #[arg(long, allow_hyphen_values = true)]
    pub cl: Option<f64>,

    /// Subgroup size
    #[arg(long)]
    pub subgroup: Option<u32>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Chart ID or short ID (CHART@N)
    pub id: String,
}

impl ListRow for ControlChart {
    fn columns() -> Vec<Column> {
        vec![
            col("TITLE", 28),
            col("TYPE", 12),
            col("LCL", 10),
            col("CL", 10),
            col("UCL", 10),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.chart_type.to_string(),
            opt(&self.lower_control_limit),
            opt(&self.center_line),
            opt(&self.upper_control_limit),
        ]
    }
}

/// Run a chart subcommand
pub fn run(cmd: ChartCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ChartCommands::List(args) => run_list(args, global),
        ChartCommands::New(args) => run_new(args, global),
        ChartCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut charts: Vec<ControlChart> = load_kind(&project)?;

    if let Some(ref parameter) = args.parameter {
        let parameter = resolve_id(&project, parameter)?;
        charts.retain(|c| c.parameter.contains(&parameter));
    }

    let charts = finish_list(charts, &args.opts);
    print_list(&charts, &project, global, args.opts.count)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let chart_type: ChartType = args.r#type.parse().map_err(|e| miette::miette!("{}", e))?;
    let parameter = session.resolve(EntityPrefix::Param, &args.parameter)?;
    let title = args
        .title
        .unwrap_or_else(|| format!("{} chart", chart_type));

    let mut chart = ControlChart::new(title, parameter, chart_type, session.author());
    chart.upper_control_limit = args.ucl;
    chart.lower_control_limit = args.lcl;
    chart.center_line = args.cl;
    chart.subgroup_size = args.subgroup;

    session.create(&mut chart, "control chart")?;
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, chart) = load_record::<ControlChart>(&project, &args.id)?;

    print_record(&path, &chart, global, |c| {
        println!("{}: {}", style("Parameter").bold(), c.parameter);
        println!("{}: {}", style("Chart Type").bold(), c.chart_type);
        field("Upper Control Limit", &c.upper_control_limit);
        field("Center Line", &c.center_line);
        field("Lower Control Limit", &c.lower_control_limit);
        field("Subgroup Size", &c.subgroup_size);
    })
}
