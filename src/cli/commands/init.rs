//! `sqt init` command - Initialize a new SQT project

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::core::identity::EntityPrefix;
use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Force initialization even if .sqt/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            println!(
                "{} Initialized SQT project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            println!("Created project structure:");
            print_structure(project.root());
            println!();
            println!("Next steps:");
            println!(
                "  {} Define a monitored parameter",
                style("sqt param new --name \"Bore diameter\" --usl 10.1 --lsl 9.9").yellow()
            );
            println!(
                "  {} Record a measurement",
                style("sqt data new --parameter PARAM@1 --value 10.02").yellow()
            );
            println!("  {} Validate project files", style("sqt validate").yellow());
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} SQT project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!("Use {} to reinitialize", style("sqt init --force").yellow());
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}

fn print_structure(root: &Path) {
    println!("  📁 {}", style(".sqt/").dim());
    if root.join(".sqt/config.yaml").exists() {
        println!("  📄 {}", style(".sqt/config.yaml").dim());
    }

    for prefix in EntityPrefix::all() {
        let dir = Project::entity_directory(*prefix);
        if root.join(dir).is_dir() {
            println!("  📁 {}", style(format!("{}/", dir)).dim());
        }
    }
}
