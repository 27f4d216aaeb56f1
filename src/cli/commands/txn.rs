//! `sqt txn` command - Shop-floor transactions

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{load_kind, open_project, opt, resolve_id, SaveSession};
use crate::cli::output::{col, finish_list, print_list, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::Transaction;

#[derive(Subcommand, Debug)]
pub enum TxnCommands {
    /// List transactions
    List(ListArgs),

    /// Record a new transaction
    New(NewArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by batch ID
    #[arg(long, short = 'b')]
    pub batch: Option<String>,

    #[command(flatten)]
    pub opts: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Short description
    #[arg(long, short = 't')]
    pub title: String,

    /// Transaction type (issue, receipt, scrap, ...)
    #[arg(long, short = 'T')]
    pub r#type: Option<String>,

    /// Batch ID or short ID (BATCH@N)
    #[arg(long, short = 'b')]
    pub batch: Option<String>,

    /// Operator ID or short ID (OPR@N)
    #[arg(long, short = 'o')]
    pub operator: Option<String>,

    /// Quantity moved
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Option<f64>,
}

impl ListRow for Transaction {
    fn columns() -> Vec<Column> {
        vec![
            col("TITLE", 28),
            col("TYPE", 10),
            col("BATCH", 16),
            col("QTY", 8),
            col("TIME", 17),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            opt(&self.transaction_type),
            opt(&self.batch),
            opt(&self.quantity),
            self.transaction_time
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        ]
    }
}

/// Run a transaction subcommand
pub fn run(cmd: TxnCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TxnCommands::List(args) => run_list(args, global),
        TxnCommands::New(args) => run_new(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut txns: Vec<Transaction> = load_kind(&project)?;

    if let Some(ref batch) = args.batch {
        let batch = resolve_id(&project, batch)?;
        txns.retain(|t| t.batch.as_deref().is_some_and(|b| b.contains(&batch)));
    }

    let txns = finish_list(txns, &args.opts);
    print_list(&txns, &project, global, args.opts.count)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let mut txn = Transaction::new(args.title, session.author());
    txn.transaction_type = args.r#type;
    txn.batch = session.resolve_opt(EntityPrefix::Batch, args.batch.as_deref())?;
    txn.operator = session.resolve_opt(EntityPrefix::Opr, args.operator.as_deref())?;
    txn.quantity = args.quantity;

    session.create(&mut txn, "transaction")?;
    Ok(())
}
