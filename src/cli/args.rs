//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    alert::AlertCommands,
    batch::BatchCommands,
    capa::CapaCommands,
    chart::ChartCommands,
    completions::CompletionsArgs,
    config::ConfigCommands,
    data::DataCommands,
    hist::HistCommands,
    init::InitArgs,
    masters::{EmpCommands, ItemCommands},
    notify::NotifyArgs,
    opr::OprCommands,
    param::ParamCommands,
    pspec::PspecCommands,
    report::ReportCommands,
    study::StudyCommands,
    txn::TxnCommands,
    validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "sqt")]
#[command(author, version, about = "SPC Quality Toolkit")]
#[command(long_about = "A Unix-style toolkit for statistical process control quality records kept as plain-text YAML files.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .sqt/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new SQT project
    Init(InitArgs),

    /// Monitored process parameters and their spec limits
    #[command(subcommand)]
    Param(ParamCommands),

    /// Control charts
    #[command(subcommand)]
    Chart(ChartCommands),

    /// Measured data points
    #[command(subcommand)]
    Data(DataCommands),

    /// Process capability studies
    #[command(subcommand)]
    Study(StudyCommands),

    /// Production batches
    #[command(subcommand)]
    Batch(BatchCommands),

    /// Shop-floor transactions
    #[command(subcommand)]
    Txn(TxnCommands),

    /// SPC alerts
    #[command(subcommand)]
    Alert(AlertCommands),

    /// Corrective/preventive actions
    #[command(subcommand)]
    Capa(CapaCommands),

    /// Item master records
    #[command(subcommand)]
    Item(ItemCommands),

    /// Employee master records
    #[command(subcommand)]
    Emp(EmpCommands),

    /// Shop-floor operators
    #[command(subcommand)]
    Opr(OprCommands),

    /// Customer or product specific parameter specifications
    #[command(subcommand)]
    Pspec(PspecCommands),

    /// Batch processing history
    #[command(subcommand)]
    Hist(HistCommands),

    /// Quality reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Re-run the save rules over project files
    Validate(ValidateArgs),

    /// Render a notification message
    Notify(NotifyArgs),

    /// Show or check configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (pretty for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
