use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dq_workflow::logging::init_tracing;
use dq_workflow::prelude::*;

#[derive(Parser)]
#[command(name = "dq-summary")]
#[command(about = "Render a data-quality report as an operator summary", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the quality report JSON
    #[arg(value_name = "REPORT", default_value = DEFAULT_REPORT_PATH)]
    report: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match render_file(&cli.report) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, path = %cli.report.display(), "Cannot render report");
            eprintln!("[ERROR] {}", e);
            ExitCode::from(1)
        }
    }
}
