//! `sqt validate` command - Re-run the save rules over existing records

use console::style;
use miette::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cli::helpers::SaveSession;
use crate::cli::GlobalOpts;
use crate::core::entity::Entity;
use crate::core::identity::EntityPrefix;
use crate::core::loader::write_entity;
use crate::core::project::{Project, RECORD_SUFFIX};
use crate::entities::{
    Alert, Batch, BatchHistory, Capa, CapabilityStudy, ControlChart, DataPoint, Employee, Item,
    Operator, Parameter, ParameterSpecification, Report, Transaction,
};
use crate::rules::{Advisory, Hooks};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Paths to validate (default: entire project)
    #[arg()]
    pub paths: Vec<PathBuf>,

    /// Strict mode - advisories become errors
    #[arg(long)]
    pub strict: bool,

    /// Specific record types to validate (e.g., param, data)
    #[arg(long, short = 't')]
    pub entity_type: Option<String>,

    /// Continue validation after first error
    #[arg(long)]
    pub keep_going: bool,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,

    /// Write derived values (status, names, defaults) back in place
    #[arg(long)]
    pub fix: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
    total_warnings: usize,
    files_fixed: usize,
}

/// Result of running the rules over one file
enum Outcome {
    Failed(miette::Report),
    Checked {
        advisories: Vec<Advisory>,
        /// The rules changed at least one field
        stale: bool,
    },
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let session = SaveSession::open(global)?;

    let mut stats = ValidationStats::default();
    let mut had_error = false;

    let files: Vec<PathBuf> = if args.paths.is_empty() {
        all_record_files(session.project())
    } else {
        expand_paths(&args.paths)
    };

    let filter: Option<EntityPrefix> = match args.entity_type {
        Some(ref t) => Some(t.parse().map_err(|e| miette::miette!("{}", e))?),
        None => None,
    };

    if !global.quiet {
        println!("{} Validating {} file(s)...\n", style("→").blue(), files.len());
    }

    for path in &files {
        let Some(prefix) = EntityPrefix::from_path(path) else {
            if !args.summary {
                println!(
                    "{} {} - unknown record type (skipped)",
                    style("?").yellow(),
                    path.display()
                );
            }
            continue;
        };

        if filter.is_some_and(|f| f != prefix) {
            continue;
        }

        stats.files_checked += 1;
        tracing::debug!(path = %path.display(), kind = %prefix, "validating");

        match check_path(&session, prefix, path, args.fix) {
            Outcome::Failed(report) => {
                stats.files_failed += 1;
                stats.total_errors += 1;
                had_error = true;
                if !args.summary {
                    println!("{} {}", style("✗").red(), path.display());
                    println!("{:?}", report);
                }
                if !args.keep_going {
                    break;
                }
            }
            Outcome::Checked { advisories, stale } => {
                if stale && args.fix {
                    stats.files_fixed += 1;
                }

                if advisories.is_empty() {
                    stats.files_passed += 1;
                    if !args.summary {
                        let note = match (stale, args.fix) {
                            (true, true) => " (fixed)",
                            (true, false) => " (derived fields out of date, use --fix)",
                            _ => "",
                        };
                        println!("{} {}{}", style("✓").green(), path.display(), style(note).dim());
                    }
                    continue;
                }

                stats.total_warnings += advisories.len();
                if !args.summary {
                    println!(
                        "{} {} - {} advisory(ies)",
                        style("!").yellow(),
                        path.display(),
                        advisories.len()
                    );
                    for advisory in &advisories {
                        println!("    {}", style(&advisory.message).yellow());
                    }
                }

                if args.strict {
                    stats.files_failed += 1;
                    had_error = true;
                    if !args.keep_going {
                        break;
                    }
                } else {
                    stats.files_passed += 1;
                }
            }
        }
    }

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files checked:  {}", style(stats.files_checked).cyan());
    println!("  Files passed:   {}", style(stats.files_passed).green());
    println!("  Files failed:   {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());
    if stats.total_warnings > 0 {
        println!("  Advisories:     {}", style(stats.total_warnings).yellow());
    }
    if stats.files_fixed > 0 {
        println!("  Files fixed:    {}", style(stats.files_fixed).cyan());
    }
    println!();

    if had_error {
        if stats.files_failed == 1 {
            Err(miette::miette!("Validation failed: 1 file has errors"))
        } else {
            Err(miette::miette!(
                "Validation failed: {} files have errors",
                stats.files_failed
            ))
        }
    } else {
        println!("{} All files passed validation!", style("✓").green().bold());
        Ok(())
    }
}

fn check_path(session: &SaveSession, prefix: EntityPrefix, path: &Path, fix: bool) -> Outcome {
    match prefix {
        EntityPrefix::Param => check_file::<Parameter>(session, path, fix),
        EntityPrefix::Pspec => check_file::<ParameterSpecification>(session, path, fix),
        EntityPrefix::Chart => check_file::<ControlChart>(session, path, fix),
        EntityPrefix::Data => check_file::<DataPoint>(session, path, fix),
        EntityPrefix::Study => check_file::<CapabilityStudy>(session, path, fix),
        EntityPrefix::Alrt => check_file::<Alert>(session, path, fix),
        EntityPrefix::Capa => check_file::<Capa>(session, path, fix),
        EntityPrefix::Rpt => check_file::<Report>(session, path, fix),
        EntityPrefix::Batch => check_file::<Batch>(session, path, fix),
        EntityPrefix::Hist => check_file::<BatchHistory>(session, path, fix),
        EntityPrefix::Txn => check_file::<Transaction>(session, path, fix),
        EntityPrefix::Opr => check_file::<Operator>(session, path, fix),
        EntityPrefix::Item => check_file::<Item>(session, path, fix),
        EntityPrefix::Emp => check_file::<Employee>(session, path, fix),
    }
}

/// Parse one file, run its save rules, and write it back when `fix` is set
fn check_file<R: Entity + Hooks>(session: &SaveSession, path: &Path, fix: bool) -> Outcome {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return Outcome::Failed(miette::miette!("{}", e)),
    };
    let mut record: R = match serde_yml::from_str(&content) {
        Ok(r) => r,
        Err(e) => return Outcome::Failed(miette::miette!("invalid {}: {}", R::PREFIX.label(), e)),
    };

    let before = serde_yml::to_string(&record).unwrap_or_default();
    let advisories = match session.check(&mut record) {
        Ok(a) => a,
        Err(e) => return Outcome::Failed(miette::Report::new(e)),
    };
    let stale = serde_yml::to_string(&record).unwrap_or_default() != before;

    if stale && fix {
        if let Err(report) = write_entity(path, &record) {
            return Outcome::Failed(report);
        }
        tracing::info!(path = %path.display(), "wrote derived fields");
    }

    Outcome::Checked { advisories, stale }
}

/// Get all record files in the project
fn all_record_files(project: &Project) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(project.root())
        .into_iter()
        .filter_entry(|e| {
            // Skip .sqt and other hidden directories
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') || e.depth() == 0
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.to_string_lossy().ends_with(RECORD_SUFFIX))
        .collect();

    files.sort();
    files
}

fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                if entry.path().to_string_lossy().ends_with(RECORD_SUFFIX) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else if path.exists() {
            files.push(path.clone());
        }
    }

    files.sort();
    files
}
