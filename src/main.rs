use clap::Parser;
use miette::Result;
use sqt::cli::commands;
use sqt::cli::{Cli, Commands, GlobalOpts};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(&global)?;

    match cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Param(cmd) => commands::param::run(cmd, &global),
        Commands::Chart(cmd) => commands::chart::run(cmd, &global),
        Commands::Data(cmd) => commands::data::run(cmd, &global),
        Commands::Study(cmd) => commands::study::run(cmd, &global),
        Commands::Batch(cmd) => commands::batch::run(cmd, &global),
        Commands::Txn(cmd) => commands::txn::run(cmd, &global),
        Commands::Alert(cmd) => commands::alert::run(cmd, &global),
        Commands::Capa(cmd) => commands::capa::run(cmd, &global),
        Commands::Item(cmd) => commands::masters::run_item(cmd, &global),
        Commands::Emp(cmd) => commands::masters::run_emp(cmd, &global),
        Commands::Opr(cmd) => commands::opr::run(cmd, &global),
        Commands::Pspec(cmd) => commands::pspec::run(cmd, &global),
        Commands::Hist(cmd) => commands::hist::run(cmd, &global),
        Commands::Report(cmd) => commands::report::run(cmd, &global),
        Commands::Validate(args) => commands::validate::run(args, &global),
        Commands::Notify(args) => commands::notify::run(args, &global),
        Commands::Config(cmd) => commands::config::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

/// Logs go to stderr; `SQT_LOG` overrides the level picked from the flags
fn init_tracing(global: &GlobalOpts) -> Result<()> {
    let level = if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SQT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| miette::miette!("failed to initialize tracing subscriber: {}", e))
}
