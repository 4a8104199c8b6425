use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dq_workflow::engine::preflight::{
    missing_inputs, missing_step_references, unresolved_requirements,
};
use dq_workflow::logging::init_tracing;
use dq_workflow::prelude::*;
use dq_workflow::EXIT_PRECONDITION;

/// Exit status when a report can't be read or parsed
const EXIT_REPORT_ERROR: i32 = 1;

#[derive(Parser)]
#[command(name = "dq-workflow")]
#[command(about = "Run data-quality pipelines and summarize their reports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline: pre-flight checks, then every step in order
    Run {
        /// Path to the pipeline config (default: ./pipeline.yaml, else built-in)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Default step timeout in seconds (overrides config)
        #[arg(short, long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Check requirements, inputs and step references without running steps
    Validate {
        /// Path to the pipeline config (default: ./pipeline.yaml, else built-in)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Render a quality report
    Summarize {
        /// Path to the quality report JSON
        #[arg(value_name = "REPORT", default_value = DEFAULT_REPORT_PATH)]
        report: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "dq-workflow failed");
            eprintln!("Error: {:#}", e);
            EXIT_PRECONDITION
        }
    };

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Run { config, timeout } => run_pipeline(config.as_deref(), timeout).await,
        Commands::Validate { config } => validate(config.as_deref()).await,
        Commands::Summarize { report } => Ok(summarize(&report)),
    }
}

fn load_pipeline(config: Option<&Path>) -> anyhow::Result<Pipeline> {
    let cwd = std::env::current_dir()?;
    Ok(PipelineLoader::load(config, &cwd)?)
}

#[tracing::instrument]
async fn run_pipeline(config: Option<&Path>, timeout: Option<u64>) -> anyhow::Result<i32> {
    let pipeline = load_pipeline(config)?;
    if let Some(source) = &pipeline.source {
        println!("Using config: {}", source.display());
    }

    let mut orchestrator = Orchestrator::new(pipeline);
    if let Some(secs) = timeout {
        orchestrator = orchestrator.with_timeout(secs);
    }

    Ok(orchestrator.run().await)
}

async fn validate(config: Option<&Path>) -> anyhow::Result<i32> {
    let pipeline = load_pipeline(config)?;
    let orchestrator = Orchestrator::new(pipeline);
    let pipeline = orchestrator.pipeline();
    let mut valid = true;

    let unresolved = unresolved_requirements(pipeline).await;
    if !unresolved.is_empty() {
        if pipeline.config.requirements.installer().is_some() {
            println!("! Requirements to install on run: {}", unresolved.join(", "));
        } else {
            println!("✗ Missing requirements: {}", unresolved.join(", "));
            valid = false;
        }
    }

    let inputs = missing_inputs(pipeline);
    if !inputs.is_empty() {
        println!("✗ Missing input files:");
        for path in &inputs {
            println!("    {}", path.display());
        }
        valid = false;
    }

    let references = missing_step_references(orchestrator.steps());
    if !references.is_empty() {
        println!("✗ Missing step executables:");
        for path in &references {
            println!("    {}", path.display());
        }
        valid = false;
    }

    if valid {
        println!(
            "✓ Pipeline '{}' is valid, {} steps",
            pipeline.config.name,
            orchestrator.steps().len()
        );
        Ok(0)
    } else {
        Ok(EXIT_PRECONDITION)
    }
}

fn summarize(report: &Path) -> i32 {
    match render_file(report) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            tracing::error!(error = %e, path = %report.display(), "Cannot render report");
            eprintln!("[ERROR] {}", e);
            EXIT_REPORT_ERROR
        }
    }
}
