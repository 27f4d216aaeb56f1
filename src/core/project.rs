//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::{EntityId, EntityPrefix};

/// Name of the project marker directory
pub const PROJECT_DIR: &str = ".sqt";

/// Suffix shared by every record file
pub const RECORD_SUFFIX: &str = ".sqt.yaml";

/// Represents an SQT project
#[derive(Debug, Clone)]
pub struct Project {
    /// Root directory of the project (parent of .sqt/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Use an explicit project path when given, otherwise discover from cwd
    pub fn open(explicit: Option<&Path>) -> Result<Self, ProjectError> {
        match explicit {
            Some(path) => Self::discover_from(path),
            None => Self::discover(),
        }
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if root.join(PROJECT_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::write_skeleton(root)
    }

    /// Force initialization even if .sqt/ exists
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::write_skeleton(root)
    }

    fn write_skeleton(root: PathBuf) -> Result<Self, ProjectError> {
        let sqt_dir = root.join(PROJECT_DIR);
        std::fs::create_dir_all(&sqt_dir).map_err(|e| ProjectError::IoError(e.to_string()))?;

        std::fs::write(sqt_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        for prefix in EntityPrefix::all() {
            std::fs::create_dir_all(root.join(Self::entity_directory(*prefix)))
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# SQT Project Configuration

# Default author for new records (can be overridden by global config)
# author: ""

# Editor used when opening records (default: $EDITOR)
# editor: ""

# Default output format (auto, yaml, tsv, json, csv, md, id)
# default_format: auto

# Prefix for batch ids generated by `sqt batch bulk-create`
# batch_prefix: BATCH

# Shop-floor operator settings (values must be greater than 0)
# operators:
#   default_shift_hours: 8
#   max_operators_per_shift: 12
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .sqt configuration directory
    pub fn sqt_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Get the path for a record file
    pub fn entity_path(&self, id: &EntityId) -> PathBuf {
        self.entity_dir(id.prefix())
            .join(format!("{}{}", id, RECORD_SUFFIX))
    }

    /// Absolute directory holding records of the given kind
    pub fn entity_dir(&self, prefix: EntityPrefix) -> PathBuf {
        self.root.join(Self::entity_directory(prefix))
    }

    /// Get the relative directory for a given record prefix
    pub fn entity_directory(prefix: EntityPrefix) -> &'static str {
        match prefix {
            EntityPrefix::Param => "spc/parameters",
            EntityPrefix::Pspec => "spc/specifications",
            EntityPrefix::Chart => "spc/charts",
            EntityPrefix::Data => "spc/data",
            EntityPrefix::Study => "quality/studies",
            EntityPrefix::Alrt => "quality/alerts",
            EntityPrefix::Capa => "quality/capas",
            EntityPrefix::Rpt => "quality/reports",
            EntityPrefix::Batch => "manufacturing/batches",
            EntityPrefix::Hist => "manufacturing/history",
            EntityPrefix::Txn => "manufacturing/transactions",
            EntityPrefix::Opr => "operators",
            EntityPrefix::Item => "masters/items",
            EntityPrefix::Emp => "masters/employees",
        }
    }

    /// Iterate all record files of a given prefix type
    pub fn iter_entity_files(&self, prefix: EntityPrefix) -> impl Iterator<Item = PathBuf> {
        walkdir::WalkDir::new(self.entity_dir(prefix))
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().to_string_lossy().ends_with(RECORD_SUFFIX))
            .map(|e| e.path().to_path_buf())
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not an SQT project (searched from {searched_from:?}). Run 'sqt init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("SQT project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.sqt_dir().join("config.yaml").exists());
        assert!(project.root().join("spc/parameters").is_dir());
        assert!(project.root().join("spc/data").is_dir());
        assert!(project.root().join("manufacturing/batches").is_dir());
        assert!(project.root().join("masters/items").is_dir());
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_project_init_force_reuses_existing() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();
        assert!(Project::init_force(tmp.path()).is_ok());
    }

    #[test]
    fn test_project_discover_from_nested_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("spc/charts");
        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_marker() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn test_entity_path_uses_kind_directory() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let id = EntityId::new(EntityPrefix::Chart);

        let path = project.entity_path(&id);
        assert!(path.starts_with(project.root().join("spc/charts")));
        assert!(path.to_string_lossy().ends_with(".sqt.yaml"));
    }
}
