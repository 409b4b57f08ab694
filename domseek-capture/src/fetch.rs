use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode, Url};
use tokio::time::sleep;

use crate::{CaptureError, RawResponse};

const DEFAULT_USER_AGENT: &str = concat!("domseek/", env!("CARGO_PKG_VERSION"));

/// Knobs for [`PageFetcher`].
#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub retries: usize,
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            retries: 2,
            user_agent: None,
        }
    }
}

/// Plain GET client that hands back whatever the server answered.
///
/// Network failures, 429 and 5xx are retried with exponential backoff
/// (honouring `Retry-After`); the final response is returned as-is, so
/// status triage is left to [`crate::parse_response`].
#[derive(Clone)]
pub struct PageFetcher {
    inner: Client,
    pub timeout: Duration,
    pub max_retries: usize,
}

impl PageFetcher {
    /// ```
    /// use domseek_capture::{FetchOptions, PageFetcher};
    /// use std::time::Duration;
    ///
    /// let fetcher = PageFetcher::new(FetchOptions {
    ///     timeout: Duration::from_secs(3),
    ///     ..Default::default()
    /// })?;
    /// assert_eq!(fetcher.timeout, Duration::from_secs(3));
    /// assert_eq!(fetcher.max_retries, 2);
    /// # Ok::<(), domseek_capture::CaptureError>(())
    /// ```
    pub fn new(opts: FetchOptions) -> Result<Self, CaptureError> {
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(opts.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()
            .map_err(|e| CaptureError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            timeout: opts.timeout,
            max_retries: opts.retries,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<RawResponse, CaptureError> {
        let url = Url::parse(url).map_err(|e| CaptureError::Url(e.to_string()))?;
        let mut attempt = 0usize;

        loop {
            let attempt0 = attempt + 1;
            tracing::debug!(
                attempt = attempt0,
                max_retries = self.max_retries,
                host_path = %format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
                timeout_ms = self.timeout.as_millis() as u64,
                "capture.fetch.start"
            );

            let t0 = std::time::Instant::now();
            let resp = match self.inner.get(url.clone()).timeout(self.timeout).send().await {
                Ok(resp) => resp,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < self.max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            attempt,
                            backoff_ms = delay.as_millis() as u64,
                            message = %message,
                            "capture.fetch.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(attempt, message = %message, "capture.fetch.network_error");
                    return Err(CaptureError::Network(message));
                }
            };

            let status = resp.status();
            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if retryable && attempt < self.max_retries {
                attempt += 1;
                let delay = retry_after_delay_secs(resp.headers())
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| backoff(attempt));
                tracing::warn!(
                    %status,
                    attempt,
                    backoff_ms = delay.as_millis() as u64,
                    "capture.fetch.retrying.status"
                );
                sleep(delay).await;
                continue;
            }

            let raw = RawResponse::from_reqwest(resp).await?;
            tracing::debug!(
                %status,
                duration_ms = t0.elapsed().as_millis() as u64,
                body_len = raw.body.len(),
                "capture.fetch.done"
            );
            tracing::trace!(body_snippet = %snip_body(&raw.body), "capture.fetch.body_snippet");
            return Ok(raw);
        }
    }
}

fn backoff(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt.saturating_sub(1)).min(16)))
}

fn retry_after_delay_secs(h: &HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .parse()
        .ok()
}

fn snip_body(body: &str) -> String {
    let mut snip: String = body.chars().take(500).collect();
    if snip.len() < body.len() {
        snip.push_str("...");
    }
    snip
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles() {
        assert_eq!(backoff(1), Duration::from_millis(200));
        assert_eq!(backoff(2), Duration::from_millis(400));
        assert_eq!(backoff(3), Duration::from_millis(800));
    }

    #[test]
    fn retry_after_parses_seconds_only() {
        let mut h = HeaderMap::new();
        assert_eq!(retry_after_delay_secs(&h), None);
        h.insert(RETRY_AFTER, "3".parse().unwrap());
        assert_eq!(retry_after_delay_secs(&h), Some(3));
        h.insert(RETRY_AFTER, "Wed, 21 Oct 2015 07:28:00 GMT".parse().unwrap());
        assert_eq!(retry_after_delay_secs(&h), None);
    }

    #[test]
    fn snip_respects_char_boundaries() {
        let long = "é".repeat(600);
        let snip = snip_body(&long);
        assert!(snip.ends_with("..."));
        assert_eq!(snip.chars().count(), 503);
        assert_eq!(snip_body("short"), "short");
    }

    #[test]
    fn bad_url_is_rejected_before_sending() {
        let fetcher = PageFetcher::new(FetchOptions::default()).unwrap();
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt.block_on(fetcher.fetch("not a url")).unwrap_err();
        assert!(matches!(err, CaptureError::Url(_)));
    }
}
