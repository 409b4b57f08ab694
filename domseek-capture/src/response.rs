use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::CaptureError;

/// Read access to a response captured from a page or a fetch.
///
/// Header names are expected lower-case.
#[async_trait]
pub trait CapturedResponse: Send + Sync {
    fn url(&self) -> &str;
    fn status(&self) -> u16;
    fn headers(&self) -> &BTreeMap<String, String>;
    /// Decoded body text. May fail when the body is no longer available.
    async fn text(&self) -> Result<String, CaptureError>;
}

/// Fully buffered response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl RawResponse {
    /// Build a response by hand, lower-casing header names.
    ///
    /// ```
    /// use domseek_capture::RawResponse;
    ///
    /// let r = RawResponse::new("https://example.com", 200, [("Content-Type", "text/html")], "<p>hi</p>");
    /// assert_eq!(r.headers["content-type"], "text/html");
    /// ```
    pub fn new<I, K, V>(url: &str, status: u16, headers: I, body: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            url: url.to_string(),
            status,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
                .collect(),
            body: body.to_string(),
        }
    }

    /// Drain a live reqwest response. Repeated headers are joined with `, `.
    pub async fn from_reqwest(resp: reqwest::Response) -> Result<Self, CaptureError> {
        let url = resp.url().to_string();
        let status = resp.status().as_u16();
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in resp.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers
                .entry(name.as_str().to_ascii_lowercase())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        let body = resp
            .text()
            .await
            .map_err(|e| CaptureError::Body(e.to_string()))?;
        Ok(Self {
            url,
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl CapturedResponse for RawResponse {
    fn url(&self) -> &str {
        &self.url
    }

    fn status(&self) -> u16 {
        self.status
    }

    fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    async fn text(&self) -> Result<String, CaptureError> {
        Ok(self.body.clone())
    }
}
