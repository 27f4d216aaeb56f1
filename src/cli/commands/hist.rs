//! `sqt hist` command - Batch processing history

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{load_kind, open_project, opt, resolve_id, SaveSession};
use crate::cli::output::{col, finish_list, print_list, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::BatchHistory;

#[derive(Subcommand, Debug)]
pub enum HistCommands {
    /// List history entries
    List(ListArgs),

    /// Record a processing value for a batch
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
    /// Batch ID or short ID (BATCH@N)
    #[arg(long, short = 'b')]
    pub batch: String,

    /// Parameter ID or short ID (PARAM@N)
    #[arg(long, short = 'p')]
    pub parameter: Option<String>,

    /// Processing step
    #[arg(long)]
    pub step: Option<String>,

    /// Actual value
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<f64>,

    /// Upper limit
    #[arg(long, allow_hyphen_values = true)]
    pub upper: Option<f64>,

    /// Lower limit
    #[arg(long, allow_hyphen_values = true)]
    pub lower: Option<f64>,
}

impl ListRow for BatchHistory {
    fn columns() -> Vec<Column> {
        vec![
            col("BATCH", 20),
            col("STEP", 16),
            col("VALUE", 10),
            col("LOWER", 10),
            col("UPPER", 10),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.batch.clone(),
            opt(&self.step),
            opt(&self.actual_value),
            opt(&self.lower_limit),
            opt(&self.upper_limit),
        ]
    }
}

/// Run a history subcommand
pub fn run(cmd: HistCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        HistCommands::List(args) => {
            let project = open_project(global)?;
            let mut entries: Vec<BatchHistory> = load_kind(&project)?;
            if let Some(ref batch) = args.batch {
                let batch = resolve_id(&project, batch)?;
                entries.retain(|h| h.batch.contains(&batch));
            }
            let entries = finish_list(entries, &args.opts);
            print_list(&entries, &project, global, args.opts.count)
        }
        HistCommands::New(args) => {
            let mut session = SaveSession::open(global)?;
            let batch = session.resolve(EntityPrefix::Batch, &args.batch)?;

            let mut entry = BatchHistory::new(batch, session.author());
            entry.parameter = session.resolve_opt(EntityPrefix::Param, args.parameter.as_deref())?;
            entry.step = args.step;
            entry.actual_value = args.value;
            entry.upper_limit = args.upper;
            entry.lower_limit = args.lower;

            session.create(&mut entry, "history entry")?;
            Ok(())
        }
    }
}
