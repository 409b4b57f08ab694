use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use domseek_search::SearchQuery;

#[derive(Debug, Parser)]
#[command(name = "domseek", version, about = "Find text in HTML and print CSS selectors for it")]
pub struct Cli {
    /// Configuration file (YAML/TOML/JSON).
    #[arg(long, short = 'c', global = true, env = "DOMSEEK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Mirror log events to stderr.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search a single page read from a file, a URL or stdin.
    Find(FindArgs),
    /// Run the jobs listed in the configuration file.
    Run {
        /// Only run the job with this id.
        #[arg(long)]
        job: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct FindArgs {
    /// HTML file to search.
    #[arg(long, short = 'f', conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Page to fetch and search.
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Search term as `label=term` (or just `term`); repeatable.
    #[arg(long = "query", short = 'q')]
    pub queries: Vec<String>,

    /// Search terms as a JSON object of `label: term`.
    #[arg(long, conflicts_with = "queries")]
    pub query_json: Option<String>,
}

impl FindArgs {
    pub fn search_query(&self) -> Result<SearchQuery> {
        if let Some(raw) = &self.query_json {
            let value: serde_json::Value = serde_json::from_str(raw)?;
            return Ok(SearchQuery::from_value(&value)?);
        }
        if self.queries.is_empty() {
            bail!("at least one --query or --query-json is required");
        }
        Ok(parse_labelled_terms(&self.queries))
    }
}

/// `label=term` pairs; bare terms get positional labels `q1`, `q2`, ...
pub fn parse_labelled_terms(raw: &[String]) -> SearchQuery {
    raw.iter()
        .enumerate()
        .map(|(i, item)| match item.split_once('=') {
            Some((label, term)) if !label.is_empty() => (label.to_string(), term.to_string()),
            _ => (format!("q{}", i + 1), item.clone()),
        })
        .collect()
}
