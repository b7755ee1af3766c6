//! MPA request signing for the Level 3 web services API.
//!
//! Each call is authenticated with an `Authorization: MPA {key}:{signature}`
//! header, where the signature is a base64 HMAC-SHA1 over:
//!
//! ```text
//! {date}\n{path}\n{content type}\n{method}\n{content md5}
//! ```
//!
//! `date` must be byte-for-byte the value sent in the `Date` header, and `path`
//! excludes the query string.

use base64::{Engine, engine::general_purpose};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

const AUTH_SCHEME: &str = "MPA";

/// Format a timestamp the way the API expects in the `Date` header,
/// e.g. `Tue, 3 Mar 2026 09:05:07 GMT` (day of month is not zero-padded).
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%a, %-d %b %Y %H:%M:%S GMT").to_string()
}

/// Current time formatted for the `Date` header.
pub fn date_now() -> String {
    format_date(Utc::now())
}

/// Signs requests with the account's API key and shared secret.
///
/// Holds no state besides the credentials; the secret never leaves this type.
#[derive(Clone)]
pub struct RequestSigner {
    api_key: String,
    api_secret: String,
}

impl RequestSigner {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Build the `Authorization` header value for one request.
    pub fn authorization(
        &self,
        date: &str,
        path: &str,
        content_type: &str,
        method: &str,
        content_md5: &str,
    ) -> String {
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}\n{}",
            date, path, content_type, method, content_md5
        );

        let mut mac = HmacSha1::new_from_slice(self.api_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(string_to_sign.as_bytes());
        let digest = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        format!("{} {}:{}", AUTH_SCHEME, self.api_key, digest)
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
