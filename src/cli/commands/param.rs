//! `sqt param` command - SPC parameter masters

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{load_kind, load_record, open_project, opt, SaveSession};
use crate::cli::output::{col, field, finish_list, print_list, print_record, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::entities::Parameter;

#[derive(Subcommand, Debug)]
pub enum ParamCommands {
    /// List parameters
    List(ListArgs),

    /// Create a new parameter
    New(NewArgs),

    /// Show a parameter's details
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub opts: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Parameter name (e.g. "Fill Volume")
    #[arg(long, short = 't')]
    pub name: String,

    /// Measurement unit
    #[arg(long, short = 'u')]
    pub unit: Option<String>,

    /// Upper specification limit
    #[arg(long, allow_hyphen_values = true)]
    pub usl: Option<f64>,

    /// Lower specification limit
    #[arg(long, allow_hyphen_values = true)]
    pub lsl: Option<f64>,

    /// Target value
    #[arg(long, allow_hyphen_values = true)]
    pub target: Option<f64>,

    /// Description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Parameter ID or short ID (PARAM@N)
    pub id: String,
}

impl ListRow for Parameter {
    fn columns() -> Vec<Column> {
        vec![
            col("NAME", 30),
            col("UNIT", 8),
            col("LSL", 10),
            col("TARGET", 10),
            col("USL", 10),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.parameter_name.clone(),
            opt(&self.unit),
            opt(&self.lower_spec_limit),
            opt(&self.target_value),
            opt(&self.upper_spec_limit),
        ]
    }
}

/// Run a parameter subcommand
pub fn run(cmd: ParamCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ParamCommands::List(args) => run_list(args, global),
        ParamCommands::New(args) => run_new(args, global),
        ParamCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let params: Vec<Parameter> = load_kind(&project)?;
    let params = finish_list(params, &args.opts);
    print_list(&params, &project, global, args.opts.count)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let mut param = Parameter::new(args.name, session.author());
    param.unit = args.unit;
    param.upper_spec_limit = args.usl;
    param.lower_spec_limit = args.lsl;
    param.target_value = args.target;
    param.description = args.description;

    session.create(&mut param, "parameter")?;
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, param) = load_record::<Parameter>(&project, &args.id)?;

    print_record(&path, &param, global, |p| {
        field("Unit", &p.unit);
        field("Lower Spec Limit", &p.lower_spec_limit);
        field("Target", &p.target_value);
        field("Upper Spec Limit", &p.upper_spec_limit);
        field("Description", &p.description);
    })
}
