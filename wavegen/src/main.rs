use anyhow::Context;
use clap::Parser;
use log::info;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use workflow::config::JobConfig;
use workflow::runner::{JobReport, Runner};

mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Generate synthetic waveforms and write them to disk")]
struct Args {
    /// Load the job from YAML; without it the built-in two-cycle column job runs
    #[arg(long)]
    job: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let job = if let Some(path) = &args.job {
        JobConfig::load(path)?
    } else {
        JobConfig::default()
    };
    let summary_log = job.summary_log.clone();

    let report = Runner::new(job).execute().context("running generation job")?;
    info!("{}", report);
    println!("{report}");

    if let Some(path) = &summary_log {
        append_summary(path, &report)?;
    }
    Ok(())
}

fn append_summary(path: &Path, report: &JobReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening summary log {}", path.display()))?;
    writeln!(file, "{report}")?;
    Ok(())
}
