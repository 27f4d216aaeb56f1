//! `sqt report` command - Quality reports

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{load_kind, open_project, opt, SaveSession};
use crate::cli::output::{col, finish_list, print_list, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::{DataPoint, Parameter, Report};
use crate::rules::QualityStatus;

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// List saved reports
    List(ListOpts),

    /// Create a report record
    New(NewArgs),

    /// Data point status counts per parameter
    Summary(SummaryArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Report name (generated from type and period when omitted)
    #[arg(long, short = 't')]
    pub name: Option<String>,

    /// Report type (Daily, Weekly, Monthly, ...)
    #[arg(long, short = 'T')]
    pub r#type: Option<String>,

    /// Period covered, e.g. 2024-W14
    #[arg(long)]
    pub period: Option<String>,

    /// Parameter ID or short ID (PARAM@N)
    #[arg(long, short = 'p')]
    pub parameter: Option<String>,

    /// Summary text
    #[arg(long)]
    pub summary: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl ListRow for Report {
    fn columns() -> Vec<Column> {
        vec![col("NAME", 34), col("TYPE", 10), col("PERIOD", 14)]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            opt(&self.report_name),
            opt(&self.report_type),
            opt(&self.time_period),
        ]
    }
}

/// Run a report subcommand
pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReportCommands::List(opts) => {
            let project = open_project(global)?;
            let reports = finish_list(load_kind::<Report>(&project)?, &opts);
            print_list(&reports, &project, global, opts.count)
        }
        ReportCommands::New(args) => run_new(args, global),
        ReportCommands::Summary(args) => run_summary(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let mut report = Report::new(session.author());
    report.report_name = args.name;
    report.report_type = args.r#type;
    report.time_period = args.period;
    report.parameter = session.resolve_opt(EntityPrefix::Param, args.parameter.as_deref())?;
    report.summary = args.summary;

    session.create(&mut report, "report")?;
    Ok(())
}

fn run_summary(args: SummaryArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let parameters: Vec<Parameter> = load_kind(&project)?;
    let points: Vec<DataPoint> = load_kind(&project)?;

    let names: HashMap<String, &str> = parameters
        .iter()
        .map(|p| (p.id.to_string(), p.parameter_name.as_str()))
        .collect();

    let counts = status_counts(&points);

    let mut output = String::new();
    output.push_str("# Data Point Status Summary\n\n");

    if counts.is_empty() {
        output.push_str("No data points recorded.\n");
    } else {
        let mut table = Builder::default();
        let header: Vec<String> = std::iter::once("Parameter".to_string())
            .chain(QualityStatus::all().iter().map(|s| capitalize(&s.to_string())))
            .chain(std::iter::once("Total".to_string()))
            .collect();
        table.push_record(header);

        for (parameter, row) in &counts {
            let name = names.get(parameter).copied().unwrap_or(parameter.as_str());
            let total: usize = row.iter().sum();
            let record: Vec<String> = std::iter::once(name.to_string())
                .chain(row.iter().map(|n| n.to_string()))
                .chain(std::iter::once(total.to_string()))
                .collect();
            table.push_record(record);
        }
        output.push_str(&table.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    write_output(&output, args.output)
}

/// Count data points by parameter and status, in `QualityStatus::all` order
fn status_counts(points: &[DataPoint]) -> BTreeMap<String, Vec<usize>> {
    let statuses = QualityStatus::all();
    let mut counts: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for point in points {
        let row = counts
            .entry(point.parameter.clone())
            .or_insert_with(|| vec![0; statuses.len()]);
        if let Some(i) = statuses.iter().position(|s| *s == point.quality_status) {
            row[i] += 1;
        }
    }
    counts
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(parameter: &str, status: QualityStatus) -> DataPoint {
        let mut p = DataPoint::new(parameter.to_string(), 1.0, "qa".to_string());
        p.quality_status = status;
        p
    }

    #[test]
    fn test_status_counts_group_by_parameter() {
        let points = vec![
            point("PARAM-A", QualityStatus::Normal),
            point("PARAM-A", QualityStatus::Critical),
            point("PARAM-A", QualityStatus::Normal),
            point("PARAM-B", QualityStatus::Warning),
        ];
        let counts = status_counts(&points);

        assert_eq!(counts.len(), 2);
        // pending, normal, warning, critical, unknown
        assert_eq!(counts["PARAM-A"], vec![0, 2, 0, 1, 0]);
        assert_eq!(counts["PARAM-B"], vec![0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("normal"), "Normal");
        assert_eq!(capitalize(""), "");
    }
}
