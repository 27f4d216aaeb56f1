//! `sqt item` and `sqt emp` commands - Master records

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{load_kind, open_project, opt, SaveSession};
use crate::cli::output::{col, finish_list, print_list, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::entities::{Employee, Item};

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List items
    List(ListOpts),

    /// Create a new item
    New(NewItemArgs),
}

#[derive(Subcommand, Debug)]
pub enum EmpCommands {
    /// List employees
    List(ListOpts),

    /// Create a new employee
    New(NewEmpArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewItemArgs {
    /// Item name
    #[arg(long, short = 't')]
    pub name: String,

    /// Stock unit
    #[arg(long)]
    pub uom: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct NewEmpArgs {
    /// Full name
    #[arg(long, short = 't')]
    pub name: String,

    /// Department
    #[arg(long)]
    pub department: Option<String>,
}

impl ListRow for Item {
    fn columns() -> Vec<Column> {
        vec![col("NAME", 36), col("UOM", 8)]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.item_name.clone(), opt(&self.uom)]
    }
}

impl ListRow for Employee {
    fn columns() -> Vec<Column> {
        vec![col("NAME", 30), col("DEPARTMENT", 20)]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.employee_name.clone(), opt(&self.department)]
    }
}

/// Run an item subcommand
pub fn run_item(cmd: ItemCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ItemCommands::List(opts) => {
            let project = open_project(global)?;
            let items = finish_list(load_kind::<Item>(&project)?, &opts);
            print_list(&items, &project, global, opts.count)
        }
        ItemCommands::New(args) => {
            let mut session = SaveSession::open(global)?;
            let mut item = Item::new(args.name, session.author());
            item.uom = args.uom;
            session.create(&mut item, "item")?;
            Ok(())
        }
    }
}

/// Run an employee subcommand
pub fn run_emp(cmd: EmpCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        EmpCommands::List(opts) => {
            let project = open_project(global)?;
            let employees = finish_list(load_kind::<Employee>(&project)?, &opts);
            print_list(&employees, &project, global, opts.count)
        }
        EmpCommands::New(args) => {
            let mut session = SaveSession::open(global)?;
            let mut emp = Employee::new(args.name, session.author());
            emp.department = args.department;
            session.create(&mut emp, "employee")?;
            Ok(())
        }
    }
}
