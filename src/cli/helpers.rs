//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::loader::{
    exact_entity_file, load_all, load_entity, matching_entity_files, record_id_from_path, write_entity,
};
use crate::core::project::Project;
use crate::core::shortid::ShortIdIndex;
use crate::core::store::ProjectStore;
use crate::core::Config;
use crate::rules::{run_save_hooks, Advisory, HookContext, Hooks, RuleError};

/// Format an EntityId for display, truncating if too long
///
/// IDs longer than 16 characters are truncated to 13 chars with "..." suffix.
pub fn format_short_id(id: &EntityId) -> String {
    let s = id.to_string();
    if s.len() > 16 {
        format!("{}...", &s[..13])
    } else {
        s
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Render an optional value, blank when absent
pub fn opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// Open the project named by `--project`, or discover it from cwd
pub fn open_project(global: &GlobalOpts) -> Result<Project> {
    Project::open(global.project.as_deref()).map_err(|e| miette::miette!("{}", e))
}

/// Resolve a `PREFIX@N` short ID; other references pass through unchanged
pub fn resolve_id(project: &Project, reference: &str) -> Result<String> {
    ShortIdIndex::load(project)
        .resolve(reference)
        .ok_or_else(|| miette::miette!("Unknown short ID '{}'. Run a list command to refresh short IDs", reference))
}

/// Expand a reference to another record into that record's full ID
///
/// Short IDs and partial IDs matching exactly one record file are expanded.
/// A reference matching nothing is kept as typed; the save rules report it.
pub fn resolve_ref(project: &Project, prefix: EntityPrefix, reference: &str) -> Result<String> {
    let resolved = resolve_id(project, reference.trim())?;
    let dir = project.entity_dir(prefix);
    if exact_entity_file(&dir, &resolved).is_some() {
        return Ok(resolved);
    }

    let matches = matching_entity_files(&dir, &resolved);
    match matches.as_slice() {
        [] => Ok(resolved),
        [path] => record_id_from_path(path).ok_or_else(|| {
            miette::miette!("Unreadable record file name: {}", path.display())
        }),
        _ => Err(miette::miette!(
            "'{}' matches {} {} records; use a longer ID or a short ID",
            reference,
            matches.len(),
            prefix.label()
        )),
    }
}

/// Expand an optional reference argument
pub fn resolve_ref_opt(
    project: &Project,
    prefix: EntityPrefix,
    reference: Option<&str>,
) -> Result<Option<String>> {
    reference.map(|r| resolve_ref(project, prefix, r)).transpose()
}

/// Load one record by full ID, partial ID, or short ID
pub fn load_record<T: Entity>(project: &Project, reference: &str) -> Result<(PathBuf, T)> {
    let resolved = resolve_id(project, reference)?;
    load_entity::<T>(&project.entity_dir(T::PREFIX), &resolved)?.ok_or_else(|| {
        miette::miette!("No {} found matching '{}'", T::PREFIX.label(), reference)
    })
}

/// Load every record of one kind from the project
pub fn load_kind<T: Entity>(project: &Project) -> Result<Vec<T>> {
    load_all(&project.entity_dir(T::PREFIX))
}

/// Write path and short ID of a saved record
pub struct Saved {
    pub path: PathBuf,
    pub short_id: String,
    pub advisories: Vec<Advisory>,
}

/// Everything needed to push records through the save pipeline
pub struct SaveSession {
    project: Project,
    config: Config,
    store: ProjectStore,
    short_ids: ShortIdIndex,
    quiet: bool,
}

impl SaveSession {
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let project = open_project(global)?;
        let config = Config::load_for(Some(&project));
        let short_ids = ShortIdIndex::load(&project);
        Ok(Self {
            store: ProjectStore::new(project.clone()),
            project,
            config,
            short_ids,
            quiet: global.quiet,
        })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn author(&self) -> String {
        self.config.author()
    }

    pub fn resolve(&self, prefix: EntityPrefix, reference: &str) -> Result<String> {
        resolve_ref(&self.project, prefix, reference)
    }

    pub fn resolve_opt(&self, prefix: EntityPrefix, reference: Option<&str>) -> Result<Option<String>> {
        resolve_ref_opt(&self.project, prefix, reference)
    }

    fn context(&self) -> HookContext<'_> {
        HookContext::new(&self.store).with_operator_settings(self.config.operators.clone())
    }

    /// Run the save hooks on a record without writing it
    pub fn check<R: Entity + Hooks>(&self, record: &mut R) -> std::result::Result<Vec<Advisory>, RuleError> {
        let mut cx = self.context();
        run_save_hooks(record, &mut cx)?;
        Ok(cx.take_advisories())
    }

    /// Run the save hooks and write the record to its file
    ///
    /// A blocking rule error leaves the file untouched.
    pub fn save<R: Entity + Hooks>(&mut self, record: &mut R) -> Result<Saved> {
        let advisories = self.check(record).map_err(miette::Report::new)?;

        let path = self.project.entity_path(record.id());
        write_entity(&path, record)?;
        tracing::debug!(id = %record.id(), path = %path.display(), "saved record");

        let id = record.id().to_string();
        let short_id = self
            .short_ids
            .add(id)
            .unwrap_or_else(|| format_short_id(record.id()));
        self.short_ids.save(&self.project).into_diagnostic()?;

        if !self.quiet {
            print_advisories(&advisories);
        }

        Ok(Saved {
            path,
            short_id,
            advisories,
        })
    }

    /// Save a record and print the standard "Created" lines
    pub fn create<R: Entity + Hooks>(&mut self, record: &mut R, noun: &str) -> Result<Saved> {
        let saved = self.save(record)?;
        if self.quiet {
            println!("{}", record.id());
        } else {
            println!(
                "{} Created {} {}",
                style("✓").green(),
                noun,
                style(&saved.short_id).cyan()
            );
            println!("   {}", style(saved.path.display()).dim());
        }
        Ok(saved)
    }
}

/// Print non-blocking advisories in the CLI's warning style
pub fn print_advisories(advisories: &[Advisory]) {
    for advisory in advisories {
        println!("   {} {}", style("!").yellow(), style(&advisory.message).yellow());
    }
}
