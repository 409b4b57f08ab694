use std::time::Duration;

use domseek_capture::{FetchOptions, PageFetcher, parse_response};
use domseek_common::{DomseekError, Result};
use domseek_config::{DomseekConfig, JobSource, JobSpec};
use domseek_search::{DomSearcher, FoundPath, NormalizeOptions, SearchQuery, TextNormalizer};
use serde::Serialize;

/// Matches for one job, as printed by `domseek run`.
#[derive(Debug, Serialize)]
pub struct JobReport {
    pub job: String,
    pub matches: Vec<FoundPath>,
}

/// Loads HTML for a source and searches it with the configured normalizer.
pub struct JobRunner {
    fetcher: PageFetcher,
    normalize: NormalizeOptions,
}

impl JobRunner {
    pub fn from_config(cfg: &DomseekConfig) -> Result<Self> {
        let fetcher = PageFetcher::new(FetchOptions {
            timeout: Duration::from_secs(cfg.fetch.timeout_secs),
            user_agent: cfg.fetch.user_agent.clone(),
            ..Default::default()
        })
        .map_err(|e| DomseekError::Config(e.to_string()))?;
        Ok(Self {
            fetcher,
            normalize: cfg.normalize,
        })
    }

    pub async fn load_html(&self, source: &JobSource) -> Result<String> {
        match source {
            JobSource::Inline { html } => Ok(html.clone()),
            JobSource::File { path } => Ok(tokio::fs::read_to_string(path).await?),
            JobSource::Url { url } => self.fetch_html(url).await,
        }
    }

    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let raw = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|e| DomseekError::Source(format!("{url}: {e}")))?;
        let parsed = parse_response(&raw).await;
        parsed.html().map(str::to_string).ok_or_else(|| {
            DomseekError::Source(format!(
                "{url}: status {} with content-type {:?} has no HTML body",
                parsed.status,
                parsed.content_type().unwrap_or("-")
            ))
        })
    }

    pub fn search(&self, html: &str, query: &SearchQuery) -> Result<Vec<FoundPath>> {
        DomSearcher::builder()
            .html(html)
            .normalizer(TextNormalizer::new(self.normalize))
            .build()
            .map(|searcher| searcher.find_query(query))
            .map_err(|e| DomseekError::Search(e.to_string()))
    }

    pub async fn run(&self, job: &JobSpec) -> Result<JobReport> {
        tracing::info!(job = %job.id, "job.start");
        if job.query.is_empty() {
            return Err(DomseekError::Search(format!("job `{}` has no query terms", job.id)));
        }
        let html = self.load_html(&job.source).await?;
        let query: SearchQuery = job.query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let matches = self.search(&html, &query)?;
        tracing::info!(job = %job.id, matches = matches.len(), "job.done");
        Ok(JobReport {
            job: job.id.clone(),
            matches,
        })
    }
}
