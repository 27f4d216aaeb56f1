//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::Project;
use crate::rules::RuleError;

/// Default prefix for generated batch ids
pub const DEFAULT_BATCH_PREFIX: &str = "BATCH";

/// Shop-floor operator settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorSettings {
    /// Default shift length in hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_shift_hours: Option<f64>,

    /// Upper bound on operators scheduled per shift
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_operators_per_shift: Option<i64>,
}

impl OperatorSettings {
    /// Both settings must be strictly positive when present
    pub fn validate(&self) -> Result<(), RuleError> {
        if let Some(hours) = self.default_shift_hours {
            if hours <= 0.0 {
                return Err(RuleError::NonPositiveSetting {
                    field: "Default Shift Hours",
                    value: hours,
                });
            }
        }
        if let Some(max) = self.max_operators_per_shift {
            if max <= 0 {
                return Err(RuleError::NonPositiveSetting {
                    field: "Max Operators Per Shift",
                    value: max as f64,
                });
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: OperatorSettings) {
        if other.default_shift_hours.is_some() {
            self.default_shift_hours = other.default_shift_hours;
        }
        if other.max_operators_per_shift.is_some() {
            self.max_operators_per_shift = other.max_operators_per_shift;
        }
    }
}

/// SQT configuration with layered hierarchy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default author for new records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Editor command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Prefix for generated batch ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_prefix: Option<String>,

    /// Operator management settings
    pub operators: OperatorSettings,
}

impl Config {
    /// Load configuration from all sources, discovering the project from cwd
    pub fn load() -> Self {
        Self::load_for(Project::discover().ok().as_ref())
    }

    /// Load configuration from all sources, merging in priority order
    pub fn load_for(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/sqt/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.sqt/config.yaml)
        if let Some(project) = project {
            if let Some(project_config) = Self::read_file(&project.sqt_dir().join("config.yaml")) {
                config.merge(project_config);
            }
        }

        // 4. Environment variables
        if let Ok(author) = std::env::var("SQT_AUTHOR") {
            config.author = Some(author);
        }
        if let Ok(editor) = std::env::var("SQT_EDITOR") {
            config.editor = Some(editor);
        }

        config
    }

    fn read_file(path: &std::path::Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sqt")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.author.is_some() {
            self.author = other.author;
        }
        if other.editor.is_some() {
            self.editor = other.editor;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.batch_prefix.is_some() {
            self.batch_prefix = other.batch_prefix;
        }
        self.operators.merge(other.operators);
    }

    /// Get the author name, falling back to git config or username
    pub fn author(&self) -> String {
        if let Some(ref author) = self.author {
            return author.clone();
        }

        if let Ok(output) = std::process::Command::new("git")
            .args(["config", "user.name"])
            .output()
        {
            if output.status.success() {
                let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !name.is_empty() {
                    return name;
                }
            }
        }

        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }

    /// Get the editor command
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }

    /// Prefix used for generated batch ids
    pub fn batch_prefix(&self) -> &str {
        self.batch_prefix
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_BATCH_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_settings_accepts_unset() {
        assert!(OperatorSettings::default().validate().is_ok());
    }

    #[test]
    fn test_operator_settings_rejects_zero_shift_hours() {
        let settings = OperatorSettings {
            default_shift_hours: Some(0.0),
            max_operators_per_shift: None,
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("Default Shift Hours"));
    }

    #[test]
    fn test_operator_settings_rejects_negative_max() {
        let settings = OperatorSettings {
            default_shift_hours: Some(8.0),
            max_operators_per_shift: Some(-2),
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("Max Operators Per Shift"));
    }

    #[test]
    fn test_merge_prefers_later_layer() {
        let mut base = Config {
            author: Some("base".to_string()),
            batch_prefix: Some("AMB".to_string()),
            ..Default::default()
        };
        let overlay: Config = serde_yml::from_str(
            "author: overlay\noperators:\n  default_shift_hours: 10\n",
        )
        .unwrap();

        base.merge(overlay);
        assert_eq!(base.author.as_deref(), Some("overlay"));
        assert_eq!(base.batch_prefix(), "AMB");
        assert_eq!(base.operators.default_shift_hours, Some(10.0));
    }

    #[test]
    fn test_batch_prefix_default() {
        assert_eq!(Config::default().batch_prefix(), DEFAULT_BATCH_PREFIX);
    }
}
