use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

use crate::CapturedResponse;

const VALUABLE_CONTENT_TYPES: [&str; 2] = ["html", "json"];
const MISSING_RESOURCE: &str = "No resource with given identifier found";

/// Outcome of decoding a JSON body. Serializes as
/// `{"valid": true, "data": ..}` or `{"valid": false, "error": ..}`.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonBody {
    Valid { data: Value },
    Invalid { error: String },
}

impl Serialize for JsonBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("JsonBody", 2)?;
        match self {
            JsonBody::Valid { data } => {
                out.serialize_field("valid", &true)?;
                out.serialize_field("data", data)?;
            }
            JsonBody::Invalid { error } => {
                out.serialize_field("valid", &false)?;
                out.serialize_field("error", error)?;
            }
        }
        out.end()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(JsonBody),
    Text(String),
    /// The body could not be read; holds the error message.
    Unavailable(String),
}

/// Triage result for one response.
///
/// `ignore` and `body` stay unset for failed responses; `ignore` is set for
/// every successful one.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ParsedResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ResponseBody>,
}

impl ParsedResponse {
    pub fn content_type(&self) -> Option<&str> {
        content_type(&self.headers)
    }

    /// Text body of a kept, non-JSON (i.e. HTML) response.
    pub fn html(&self) -> Option<&str> {
        match (&self.body, self.content_type()) {
            (Some(ResponseBody::Text(text)), Some(ct)) if ct.contains("html") => Some(text),
            _ => None,
        }
    }
}

fn content_type(headers: &BTreeMap<String, String>) -> Option<&str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
        .map(|(_, v)| v.as_str())
}

/// Reduce a captured response to status, headers and, for HTML/JSON
/// successes, its body.
///
/// A status of `0` (unknown) counts as `200`. Body read failures are logged
/// and recorded as [`ResponseBody::Unavailable`]; nothing is retried.
pub async fn parse_response<R: CapturedResponse + ?Sized>(response: &R) -> ParsedResponse {
    let status = response.status();
    let mut result = ParsedResponse {
        status,
        headers: response.headers().clone(),
        ignore: None,
        body: None,
    };

    let effective = if status == 0 { 200 } else { status };
    if effective > 300 {
        tracing::debug!(status, url = %response.url(), "capture.parse.failed_status");
        return result;
    }

    let content_type = content_type(&result.headers).map(str::to_string);
    let valuable = content_type
        .as_deref()
        .is_some_and(|ct| VALUABLE_CONTENT_TYPES.iter().any(|v| ct.contains(v)));
    if !valuable {
        tracing::trace!(status, content_type = ?content_type, "capture.parse.ignored");
        result.ignore = Some(true);
        return result;
    }
    result.ignore = Some(false);

    let is_json = content_type.as_deref().is_some_and(|ct| ct.contains("json"));
    result.body = Some(match response.text().await {
        Ok(text) if is_json => ResponseBody::Json(match serde_json::from_str(&text) {
            Ok(data) => JsonBody::Valid { data },
            Err(e) => JsonBody::Invalid {
                error: e.to_string(),
            },
        }),
        Ok(text) => ResponseBody::Text(text),
        Err(err) => {
            let message = err.to_string();
            if message.contains(MISSING_RESOURCE) {
                tracing::warn!("{} {} - {}", status, response.url(), message);
            } else {
                tracing::error!(status, url = %response.url(), error = %message, "capture.parse.body_error");
            }
            ResponseBody::Unavailable(message)
        }
    });
    result
}
