//! `sqt data` command - Process data points

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::Subcommand;
use console::style;
use csv::ReaderBuilder;
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::cli::helpers::{load_kind, load_record, open_project, opt, resolve_id, truncate_str, SaveSession};
use crate::cli::output::{col, field, finish_list, print_list, print_record, Column, ListOpts, ListRow};
use crate::cli::GlobalOpts;
use crate::core::EntityPrefix;
use crate::entities::DataPoint;
use crate::rules::QualityStatus;

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// List data points
    List(ListArgs),

    /// Record a new data point
    New(NewArgs),

    /// Show a data point's details
    Show(ShowArgs),

    /// Import data points from a CSV file
    Import(ImportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by parameter ID
    #[arg(long, short = 'p')]
    pub parameter: Option<String>,

    /// Filter by quality status (pending, normal, warning, critical, unknown)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Filter by batch reference
    #[arg(long, short = 'b')]
    pub batch: Option<String>,

    #[command(flatten)]
    pub opts: ListOpts,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Parameter ID or short ID (PARAM@N)
    #[arg(long, short = 'p')]
    pub parameter: String,

    /// Measured value
    #[arg(long, allow_hyphen_values = true)]
    pub value: f64,

    /// Measurement time (RFC 3339 or "YYYY-MM-DD HH:MM:SS", default: now)
    #[arg(long, value_parser = parse_timestamp)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Batch reference
    #[arg(long, short = 'b')]
    pub batch: Option<String>,

    /// Operator
    #[arg(long, short = 'o')]
    pub operator: Option<String>,

    /// Notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Data point ID or short ID (DATA@N)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file with columns: parameter, value, timestamp, batch, operator
    pub file: PathBuf,

    /// Validate rows without creating files
    #[arg(long)]
    pub dry_run: bool,

    /// Continue past bad rows
    #[arg(long)]
    pub skip_errors: bool,
}

impl ListRow for DataPoint {
    fn columns() -> Vec<Column> {
        vec![
            col("PARAMETER", 20),
            col("VALUE", 10),
            col("STATUS", 10),
            col("BATCH", 20),
            col("TIMESTAMP", 17),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.parameter.clone(),
            self.data_value.to_string(),
            self.quality_status.to_string(),
            opt(&self.batch_reference),
            self.timestamp
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        ]
    }
}

/// Run a data subcommand
pub fn run(cmd: DataCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DataCommands::List(args) => run_list(args, global),
        DataCommands::New(args) => run_new(args, global),
        DataCommands::Show(args) => run_show(args, global),
        DataCommands::Import(args) => run_import(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let mut points: Vec<DataPoint> = load_kind(&project)?;

    if let Some(ref parameter) = args.parameter {
        let parameter = resolve_id(&project, parameter)?;
        points.retain(|p| p.parameter.contains(&parameter));
    }
    if let Some(ref status) = args.status {
        let status: QualityStatus = status.parse().map_err(|e| miette::miette!("{}", e))?;
        points.retain(|p| p.quality_status == status);
    }
    if let Some(ref batch) = args.batch {
        points.retain(|p| p.batch_reference.as_deref() == Some(batch.as_str()));
    }

    let points = finish_list(points, &args.opts);
    print_list(&points, &project, global, args.opts.count)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = SaveSession::open(global)?;

    let parameter = session.resolve(EntityPrefix::Param, &args.parameter)?;
    let mut point = DataPoint::new(parameter, args.value, session.author());
    point.timestamp = args.timestamp;
    point.batch_reference = args.batch;
    point.operator = args.operator;
    point.notes = args.notes;

    session.create(&mut point, "data point")?;
    if !global.quiet {
        println!("   Status: {}", status_style(point.quality_status));
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = open_project(global)?;
    let (path, point) = load_record::<DataPoint>(&project, &args.id)?;

    print_record(&path, &point, global, |p| {
        println!("{}: {}", style("Value").bold(), p.data_value);
        println!("{}: {}", style("Quality Status").bold(), status_style(p.quality_status));
        field("Timestamp", &p.timestamp.map(|t| t.format("%Y-%m-%d %H:%M:%S")));
        field("Batch", &p.batch_reference);
        field("Operator", &p.operator);
        field("Notes", &p.notes);
    })
}

/// Counters reported at the end of an import
#[derive(Default)]
struct ImportStats {
    rows_processed: usize,
    created: usize,
    errors: usize,
}

fn run_import(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if !args.file.exists() {
        return Err(miette::miette!("File not found: {}", args.file.display()));
    }

    let mut session = SaveSession::open(global)?;

    println!(
        "{} Importing data points from {}{}",
        style("→").blue(),
        style(args.file.display()).yellow(),
        if args.dry_run { style(" (dry run)").dim().to_string() } else { String::new() }
    );
    println!();

    let file = File::open(&args.file).into_diagnostic()?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers().into_diagnostic()?.clone();
    let header_map = build_header_map(&headers);
    let mut stats = ImportStats::default();

    for (row_idx, result) in rdr.records().enumerate() {
        let row_num = row_idx + 2;
        stats.rows_processed += 1;

        let outcome = result
            .map_err(|e| format!("CSV parse error: {}", e))
            .and_then(|record| row_to_point(&session, &record, &header_map));

        let mut point = match outcome {
            Ok(point) => point,
            Err(message) => {
                eprintln!("{} Row {}: {}", style("✗").red(), row_num, message);
                stats.errors += 1;
                if !args.skip_errors {
                    return Err(miette::miette!("Import failed at row {}: {}", row_num, message));
                }
                continue;
            }
        };

        if args.dry_run {
            match session.check(&mut point) {
                Ok(_) => println!(
                    "{} Row {}: Would create {} = {} ({})",
                    style("○").dim(),
                    row_num,
                    truncate_str(&point.parameter, 20),
                    point.data_value,
                    status_style(point.quality_status)
                ),
                Err(e) => {
                    eprintln!("{} Row {}: {}", style("✗").red(), row_num, e);
                    stats.errors += 1;
                    if !args.skip_errors {
                        return Err(miette::miette!("Import failed at row {}: {}", row_num, e));
                    }
                }
            }
            continue;
        }

        match session.save(&mut point) {
            Ok(saved) => {
                println!(
                    "{} Row {}: Created {} - {} ({})",
                    style("✓").green(),
                    row_num,
                    style(&saved.short_id).cyan(),
                    point.data_value,
                    status_style(point.quality_status)
                );
                stats.created += 1;
            }
            Err(e) => {
                eprintln!("{} Row {}: {}", style("✗").red(), row_num, e);
                stats.errors += 1;
                if !args.skip_errors {
                    return Err(e);
                }
            }
        }
    }

    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Rows processed:   {}", style(stats.rows_processed).cyan());
    println!("  Data points:      {}", style(stats.created).green());
    if stats.errors > 0 {
        println!("  Errors:           {}", style(stats.errors).red());
    }

    if args.dry_run {
        println!();
        println!("{}", style("Dry run complete. No files were created.").yellow());
    }

    Ok(())
}

fn row_to_point(
    session: &SaveSession,
    record: &csv::StringRecord,
    header_map: &HashMap<String, usize>,
) -> std::result::Result<DataPoint, String> {
    let parameter = get_field(record, header_map, "parameter")
        .ok_or_else(|| "Missing required field 'parameter'".to_string())?;
    let parameter = session.resolve(EntityPrefix::Param, &parameter).map_err(|e| e.to_string())?;

    let value = get_field(record, header_map, "value")
        .ok_or_else(|| "Missing required field 'value'".to_string())?;
    let value: f64 = value
        .parse()
        .map_err(|_| format!("Invalid value '{}'", value))?;

    let mut point = DataPoint::new(parameter, value, session.author());
    if let Some(ts) = get_field(record, header_map, "timestamp") {
        point.timestamp = Some(parse_timestamp(&ts)?);
    }
    point.batch_reference = get_field(record, header_map, "batch");
    point.operator = get_field(record, header_map, "operator");
    Ok(point)
}

/// Map lower-cased CSV headers to their column index
fn build_header_map(headers: &csv::StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase().trim().to_string(), i))
        .collect()
}

/// Get a non-empty field value from a CSV record
fn get_field(
    record: &csv::StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<String> {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse RFC 3339, "YYYY-MM-DD HH:MM[:SS]" (UTC) or a bare date
fn parse_timestamp(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("Invalid timestamp '{}'", s))
}

fn status_style(status: QualityStatus) -> String {
    match status {
        QualityStatus::Normal => style(status).green().to_string(),
        QualityStatus::Warning => style(status).yellow().to_string(),
        QualityStatus::Critical => style(status).red().bold().to_string(),
        QualityStatus::Unknown => style(status).magenta().to_string(),
        QualityStatus::Pending => style(status).dim().to_string(),
    }
}
