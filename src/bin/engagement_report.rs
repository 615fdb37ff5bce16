use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use engagement_report::{EngagementReporter, ReportConfig, ReportError, DEFAULT_METRIC};

#[derive(Parser)]
#[command(author, version, about = "Cumulative engagement growth chart from a post export CSV")]
struct Args {
    /// Counter column shown by default (diggCount, commentCount, collectCount, playCount, shareCount)
    #[arg(long, default_value = DEFAULT_METRIC)]
    metric: String,
    /// Load paths and title from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Input CSV (overrides the config)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output HTML (overrides the config)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), ReportError> {
    let mut config = match args.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(input) = args.input {
        config.input_path = input;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }

    let reporter = EngagementReporter::new(config);
    let chart = reporter.generate(&args.metric)?;

    println!(
        "Wrote {} (visible by default: {:?})",
        reporter.config().output_path.display(),
        chart.visible_series()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
