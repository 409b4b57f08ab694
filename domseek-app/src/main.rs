use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use domseek_common::observability::{LogConfig, LogFormat, init_logging};
use domseek_config::{DomseekConfig, DomseekConfigLoader, LoggingConfig};
use serde::Serialize;

use cli::{Cli, Command, FindArgs};
use jobs::{JobReport, JobRunner};

mod cli;
mod jobs;

const DEFAULT_CONFIG: &str = "domseek.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `run` needs its file; `find` works from defaults and the environment.
    let loader = DomseekConfigLoader::new();
    let loader = match (&cli.config, &cli.command) {
        (Some(path), _) => loader.with_file(path),
        (None, Command::Run { .. }) => loader.with_file(DEFAULT_CONFIG),
        (None, Command::Find(_)) => loader.with_optional_file(DEFAULT_CONFIG),
    };
    let cfg: DomseekConfig = loader.load().context("loading configuration")?;

    init_logging(log_config(&cfg.logging, cli.log_stderr))?;

    let runner = JobRunner::from_config(&cfg)?;
    match &cli.command {
        Command::Find(args) => {
            let found = find(&runner, args).await?;
            print_json(&found, cli.pretty)
        }
        Command::Run { job } => {
            let mut reports: Vec<JobReport> = Vec::new();
            for spec in cfg.active_jobs(job.as_deref()) {
                let report = runner
                    .run(spec)
                    .await
                    .with_context(|| format!("job `{}` failed", spec.id))?;
                reports.push(report);
            }
            if let (Some(id), true) = (job, reports.is_empty()) {
                anyhow::bail!("no enabled job with id `{id}`");
            }
            print_json(&reports, cli.pretty)
        }
    }
}

async fn find(runner: &JobRunner, args: &FindArgs) -> Result<Vec<domseek_search::FoundPath>> {
    let query = args.search_query()?;
    let html = match (&args.file, &args.url) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, Some(url)) => runner.fetch_html(url).await?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading HTML from stdin")?;
            buf
        }
    };
    Ok(runner.search(&html, &query)?)
}

fn log_config(logging: &LoggingConfig, force_stderr: bool) -> LogConfig {
    LogConfig {
        log_dir: logging.dir.clone(),
        emit_stderr: logging.stderr || force_stderr,
        format: match logging.format {
            domseek_config::LogFormat::Text => LogFormat::Text,
            domseek_config::LogFormat::Json => LogFormat::Json,
        },
        default_filter: logging.level.clone(),
        ..LogConfig::default()
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
