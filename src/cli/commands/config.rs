//! `sqt config` command - Configuration inspection
//!
//! Shows the effective configuration and checks the operator settings.

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::project::Project;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Check configured settings against their rules
    Check,

    /// Show paths to configuration files
    Path,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    let project = Project::open(global.project.as_deref()).ok();
    let config = Config::load_for(project.as_ref());

    match cmd {
        ConfigCommands::Show(args) => run_show(args, &config),
        ConfigCommands::Check => run_check(&config, global),
        ConfigCommands::Path => run_path(project.as_ref()),
    }
}

fn run_show(args: ShowArgs, config: &Config) -> Result<()> {
    if let Some(key) = &args.key {
        return match get_config_value(config, key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();

    print_config_value("author", Some(&config.author()));
    print_config_value("editor", Some(&config.editor()));
    print_config_value("default_format", config.default_format.as_deref());
    print_config_value("batch_prefix", Some(config.batch_prefix()));
    print_config_value(
        "operators.default_shift_hours",
        config.operators.default_shift_hours.map(|v| v.to_string()).as_deref(),
    );
    print_config_value(
        "operators.max_operators_per_shift",
        config.operators.max_operators_per_shift.map(|v| v.to_string()).as_deref(),
    );

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (SQT_AUTHOR, SQT_EDITOR)");
    println!("  2. Project config (.sqt/config.yaml)");
    println!("  3. Global config (~/.config/sqt/config.yaml)");

    Ok(())
}

fn run_check(config: &Config, global: &GlobalOpts) -> Result<()> {
    config.operators.validate().map_err(miette::Report::new)?;
    if !global.quiet {
        println!("{} Configuration is valid", style("✓").green());
    }
    Ok(())
}

fn run_path(project: Option<&Project>) -> Result<()> {
    let global_path = global_config_path()?;

    println!("{}", style("Configuration file paths:").bold());
    println!();
    println!("  {} {}", style("Global:").cyan(), global_path.display());
    print_exists(global_path.exists(), 9);

    println!();
    match project {
        Some(project) => {
            let path = project.sqt_dir().join("config.yaml");
            println!("  {} {}", style("Project:").cyan(), path.display());
            print_exists(path.exists(), 10);
        }
        None => println!(
            "  {} {}",
            style("Project:").cyan(),
            style("(not in an SQT project)").dim()
        ),
    }

    Ok(())
}

fn print_exists(exists: bool, indent: usize) {
    if exists {
        println!("{}{}", " ".repeat(indent), style("(exists)").green());
    } else {
        println!("{}{}", " ".repeat(indent), style("(not created)").dim());
    }
}

fn global_config_path() -> Result<PathBuf> {
    directories::ProjectDirs::from("", "", "sqt")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "author" => Some(config.author()),
        "editor" => Some(config.editor()),
        "default_format" => config.default_format.clone(),
        "batch_prefix" => Some(config.batch_prefix().to_string()),
        "operators.default_shift_hours" => config.operators.default_shift_hours.map(|v| v.to_string()),
        "operators.max_operators_per_shift" => {
            config.operators.max_operators_per_shift.map(|v| v.to_string())
        }
        _ => None,
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}
