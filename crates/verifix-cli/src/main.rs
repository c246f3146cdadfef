use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use verifix_report::{render_json, render_transcript};
use verifix_runner::Runner;

#[derive(Parser)]
#[command(name = "verifix", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize verifix in the current project (creates .verifix/, config)
    Init,

    /// Validate config, default suite, and artifact paths
    Doctor,

    /// Load a suite, validate it, and list its checks
    Checks {
        /// Suite file (defaults to project.default_suite)
        #[arg(long)]
        suite: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Run a suite and print the transcript
    Run {
        /// Suite file (defaults to project.default_suite)
        #[arg(long)]
        suite: Option<PathBuf>,
        /// Print the JSON report instead of the transcript
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Skip persisting the report
        #[arg(long, default_value_t = false)]
        no_store: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let project_root = std::env::current_dir()?;

    match cli.cmd {
        Command::Init => {
            Runner::init_project(&project_root)?;
            println!("Initialized verifix in {}", project_root.display());
        }
        Command::Doctor => {
            let r = Runner::open(project_root)?;
            r.doctor()?;
            println!("OK");
        }
        Command::Checks { suite, json } => {
            let r = Runner::open(project_root)?;
            let (path, suite) = r.resolve_suite(suite.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&suite.criteria)?);
            } else {
                println!(
                    "suite {} ({} checks) from {}",
                    suite.name,
                    suite.criteria.len(),
                    path.display()
                );
                for criterion in &suite.criteria {
                    let kind = if criterion.is_blocking() { "blocking" } else { "advisory" };
                    println!("- {} [{}] on {}", criterion.name, kind, criterion.artifact);
                }
            }
        }
        Command::Run { suite, json, no_store } => {
            let r = Runner::open(project_root)?;
            let outcome = r.run_suite(suite.as_deref(), !no_store)?;
            if json {
                println!("{}", render_json(&outcome.report)?);
            } else {
                print!("{}", render_transcript(&outcome.report));
            }
            if let Some(dir) = &outcome.run_dir {
                eprintln!("report stored in {}", dir.display());
            }
            // Failed checks are the only thing that flips the exit status.
            if !outcome.report.is_success() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
