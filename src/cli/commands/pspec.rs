//! `sqt pspec` command - Parameter specifications

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{load_kind, open_project, opt, resolve_id, SaveSession};
use crate::cli::output::{col, finish_list, print_list, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::ParameterSpecification;

#[derive(Subcommand, Debug)]
pub enum PspecCommands {
    /// List parameter specifications
    List(ListArgs),

    /// Create a new parameter specification
    New(NewArgs),
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

    /// Title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Product item ID or short ID (ITEM@N)
    #[arg(long)]
    pub product: Option<String>,

    /// Customer
    #[arg(long)]
    pub customer: Option<String>,
}

impl ListRow for ParameterSpecification {
    fn columns() -> Vec<Column> {
        vec![
            col("TITLE", 28),
            col("PARAMETER", 22),
            col("PRODUCT", 16),
            col("CUSTOMER", 16),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.parameter_name.clone().unwrap_or_else(|| self.parameter.clone()),
            opt(&self.product),
            opt(&self.customer),
        ]
    }
}

/// Run a parameter specification subcommand
pub fn run(cmd: PspecCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PspecCommands::List(args) => {
            let project = open_project(global)?;
            let mut specs: Vec<ParameterSpecification> = load_kind(&project)?;
            if let Some(ref parameter) = args.parameter {
                let parameter = resolve_id(&project, parameter)?;
                specs.retain(|s| s.parameter.contains(&parameter));
            }
            let specs = finish_list(specs, &args.opts);
            print_list(&specs, &project, global, args.opts.count)
        }
        PspecCommands::New(args) => run_new(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let parameter = session.resolve(EntityPrefix::Param, &args.parameter)?;
    let title = args.title.unwrap_or_else(|| {
        match args.customer {
            Some(ref customer) => format!("Specification for {}", customer),
            None => "Parameter specification".to_string(),
        }
    });

    let mut spec = ParameterSpecification::new(title, parameter, session.author());
    spec.product = session.resolve_opt(EntityPrefix::Item, args.product.as_deref())?;
    spec.customer = args.customer;

    session.create(&mut spec, "parameter specification")?;
    Ok(())
}
