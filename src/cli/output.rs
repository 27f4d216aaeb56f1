//! List and show output shared by the record commands

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Entity;
use crate::core::project::Project;
use crate::core::shortid::ShortIdIndex;

/// A column of a record listing
pub struct Column {
    pub header: &'static str,
    pub width: usize,
}

pub const fn col(header: &'static str, width: usize) -> Column {
    Column { header, width }
}

/// Records that can be listed in a table
pub trait ListRow: Entity {
    /// Columns after the short ID column
    fn columns() -> Vec<Column>;

    /// Cell values, in the order of [`ListRow::columns`]
    fn cells(&self) -> Vec<String>;
}

/// Print a list of records in the requested format
///
/// Every listed record gets a short ID so it can be referenced as `PREFIX@N`.
pub fn print_list<T: ListRow>(
    records: &[T],
    project: &Project,
    global: &GlobalOpts,
    count_only: bool,
) -> Result<()> {
    if count_only {
        println!("{}", records.len());
        return Ok(());
    }

    if records.is_empty() {
        if !global.quiet {
            println!("No {}s found.", T::PREFIX.label());
        }
        return Ok(());
    }

    let mut short_ids = ShortIdIndex::load(project);
    short_ids.ensure_all(records.iter().map(|r| r.id().to_string()));
    if let Err(e) = short_ids.save(project) {
        tracing::warn!(error = %e, "could not save short ID index");
    }
    let short_of = |r: &T| {
        short_ids
            .get_short_id(&r.id().to_string())
            .unwrap_or_else(|| format_short_id(r.id()))
    };

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };
    let columns = T::columns();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(records).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(records).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            let header: Vec<String> = ["short_id", "id"]
                .into_iter()
                .map(String::from)
                .chain(columns.iter().map(|c| c.header.to_lowercase().replace(' ', "_")))
                .collect();
            println!("{}", header.join(","));
            for record in records {
                let mut row = vec![short_of(record), record.id().to_string()];
                row.extend(record.cells().iter().map(|c| escape_csv(c)));
                println!("{}", row.join(","));
            }
        }
        OutputFormat::Tsv => {
            let mut header_parts = vec![format!("{:<12}", style("SHORT").bold())];
            for c in &columns {
                header_parts.push(format!("{:<width$}", style(c.header).bold(), width = c.width));
            }
            println!("{}", header_parts.join(" "));
            let total: usize = 12 + columns.iter().map(|c| c.width + 1).sum::<usize>();
            println!("{}", "-".repeat(total));

            for record in records {
                let mut row_parts =
                    vec![format!("{:<12}", style(truncate_str(&short_of(record), 12)).cyan())];
                for (c, value) in columns.iter().zip(record.cells()) {
                    row_parts.push(format!(
                        "{:<width$}",
                        truncate_str(&value, c.width),
                        width = c.width
                    ));
                }
                println!("{}", row_parts.join(" "));
            }

            if !global.quiet {
                println!();
                println!(
                    "{} {}(s) found. Use {} to reference by short ID.",
                    style(records.len()).cyan(),
                    T::PREFIX.label(),
                    style(format!("{}@N", T::PREFIX)).cyan()
                );
            }
        }
        OutputFormat::Id => {
            for record in records {
                println!("{}", record.id());
            }
        }
        OutputFormat::Md => {
            let mut builder = Builder::default();
            let header: Vec<String> = std::iter::once("Short".to_string())
                .chain(columns.iter().map(|c| c.header.to_string()))
                .collect();
            builder.push_record(header);
            for record in records {
                let row: Vec<String> = std::iter::once(short_of(record))
                    .chain(record.cells())
                    .collect();
                builder.push_record(row);
            }
            println!("{}", builder.build().with(Style::markdown()));
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}

/// Print one record; `pretty` renders the human-readable form
pub fn print_record<T: Entity>(
    path: &Path,
    record: &T,
    global: &GlobalOpts,
    pretty: impl FnOnce(&T),
) -> Result<()> {
    match global.format {
        OutputFormat::Yaml => {
            let content = std::fs::read_to_string(path).into_diagnostic()?;
            print!("{}", content);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(record).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Id => {
            println!("{}", record.id());
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!("{}: {}", style("ID").bold(), style(record.id()).cyan());
            println!("{}: {}", style("Title").bold(), style(record.title()).yellow());
            println!("{}", style("─".repeat(60)).dim());

            pretty(record);

            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {} | {}: {}",
                style("Author").dim(),
                record.author(),
                style("Created").dim(),
                record.created().format("%Y-%m-%d %H:%M"),
            );
        }
    }
    Ok(())
}

/// Print a `Label: value` line when the value is present
pub fn field<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    if let Some(v) = value {
        println!("{}: {}", style(label).bold(), v);
    }
}

/// Apply the shared `--search`/`--limit`/`--reverse` list options
pub fn finish_list<T: Entity>(mut records: Vec<T>, opts: &ListOpts) -> Vec<T> {
    if let Some(ref search) = opts.search {
        let needle = search.to_lowercase();
        records.retain(|r| r.title().to_lowercase().contains(&needle));
    }
    records.sort_by(|a, b| a.created().cmp(&b.created()));
    if opts.reverse {
        records.reverse();
    }
    if let Some(limit) = opts.limit {
        records.truncate(limit);
    }
    records
}

/// Options shared by every `list` subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListOpts {
    /// Search in title
    #[arg(long)]
    pub search: Option<String>,

    /// Reverse sort order (default: oldest first)
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}
