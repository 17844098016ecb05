//! HTTP page fetching with best-effort charset decoding.

use std::sync::LazyLock;
use std::time::Duration;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::bytes::Regex;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};
use url::Url;

use seeing_stars_shared::{FetchError, HttpConfig, Result, StarsError};

/// How far into the body a `<meta charset>` declaration is looked for.
const META_SNIFF_LEN: usize = 1024;

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Blocking-per-source page fetcher. One request at a time, no retry.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StarsError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch `url` and return its decoded text.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        debug!(status = status.as_u16(), len = bytes.len(), "page fetched");

        Ok(decode_body(&bytes, content_type.as_deref()))
    }
}

/// Map a transport error onto the matching [`FetchError`] kind.
fn classify(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Reasons the primary charset could not be chosen. Never leaves this module.
#[derive(Debug, thiserror::Error)]
enum DecodeError {
    #[error("unknown charset label '{0}'")]
    UnknownLabel(String),

    #[error("no charset declared and body is not valid UTF-8")]
    Undetermined,
}

/// Decode a response body to text.
///
/// Uses the declared or sniffed charset, replacing malformed sequences.
/// When no usable charset is found, falls back to a lossy Windows-1252
/// decode. Always returns text.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    match primary_encoding(bytes, content_type) {
        Ok(encoding) => {
            let (text, used, had_errors) = encoding.decode(bytes);
            debug!(encoding = used.name(), had_errors, "decoded body");
            text.into_owned()
        }
        Err(e) => {
            debug!(reason = %e, "falling back to windows-1252");
            let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

fn primary_encoding(
    bytes: &[u8],
    content_type: Option<&str>,
) -> std::result::Result<&'static Encoding, DecodeError> {
    if let Some(label) = content_type.and_then(charset_param) {
        return lookup(&label);
    }

    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return Ok(encoding);
    }

    if let Some(label) = sniff_meta_charset(bytes) {
        return lookup(&label);
    }

    if std::str::from_utf8(bytes).is_ok() {
        return Ok(UTF_8);
    }

    Err(DecodeError::Undetermined)
}

fn lookup(label: &str) -> std::result::Result<&'static Encoding, DecodeError> {
    Encoding::for_label(label.as_bytes()).ok_or_else(|| DecodeError::UnknownLabel(label.into()))
}

/// Extract the `charset` parameter from a `Content-Type` header value.
fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Find a `<meta charset=...>` or `http-equiv` content charset near the top.
fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    static META_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"(?i-u)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_.:\-]+)"#)
            .expect("valid regex")
    });

    let head = &bytes[..bytes.len().min(META_SNIFF_LEN)];
    let caps = META_RE.captures(head)?;
    let label = caps.get(1)?.as_bytes();
    Some(String::from_utf8_lossy(label).into_owned())
}
