//! `sqt opr` command - Shop-floor operators

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{load_kind, open_project, opt, SaveSession};
use crate::cli::output::{col, finish_list, print_list, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::Operator;

#[derive(Subcommand, Debug)]
pub enum OprCommands {
    /// List operators
    List(ListArgs),

    /// Register a new operator
    New(NewArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by shift
    #[arg(long)]
    pub shift: Option<String>,

    #[command(flatten)]
    pub opts: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Badge or operator code
    #[arg(long, short = 'c')]
    pub code: String,

    /// Employee ID or short ID (EMP@N)
    #[arg(long, short = 'e')]
    pub employee: Option<String>,

    /// Shift
    #[arg(long)]
    pub shift: Option<String>,

    /// Skill level
    #[arg(long)]
    pub skill: Option<String>,
}

impl ListRow for Operator {
    fn columns() -> Vec<Column> {
        vec![
            col("CODE", 12),
            col("NAME", 26),
            col("SHIFT", 10),
            col("SKILL", 12),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.operator_code.clone(),
            opt(&self.employee_name),
            opt(&self.shift),
            opt(&self.skill_level),
        ]
    }
}

/// Run an operator subcommand
pub fn run(cmd: OprCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        OprCommands::List(args) => {
            let project = open_project(global)?;
            let mut operators: Vec<Operator> = load_kind(&project)?;
            if let Some(ref shift) = args.shift {
                operators.retain(|o| o.shift.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(shift)));
            }
            let operators = finish_list(operators, &args.opts);
            print_list(&operators, &project, global, args.opts.count)
        }
        OprCommands::New(args) => run_new(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let mut operator = Operator::new(args.code, session.author());
    operator.employee = session.resolve_opt(EntityPrefix::Emp, args.employee.as_deref())?;
    operator.shift = args.shift;
    operator.skill_level = args.skill;

    session.create(&mut operator, "operator")?;
    if !global.quiet {
        if let Some(ref name) = operator.employee_name {
            println!("   Employee: {}", style(name).yellow());
        }
    }
    Ok(())
}
