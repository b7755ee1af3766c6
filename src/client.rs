use std::time::Duration;

use regex::Regex;
use wreq::header::{self, HeaderMap, HeaderValue};
use wreq::{Client, StatusCode};

use crate::error::{InvalidationError, Result};
use crate::payload::{build_properties_xml, encode_ascii};
use crate::signer::{self, RequestSigner};

const API_SERVER: &str = "ws.level3.com";
const KEY_PATH: &str = "/key/v1.0";
const INVALIDATIONS_PATH: &str = "/invalidations/v1.0";
const CONTENT_TYPE_XML: &str = "text/xml";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Outcome of an invalidation POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidationOutcome {
    pub status: u16,
}

impl InvalidationOutcome {
    /// Only an exact 200 counts as accepted.
    pub fn accepted(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

/// The two remote operations a run performs.
#[allow(async_fn_in_trait)]
pub trait InvalidationApi {
    /// Discover the account's access group id.
    async fn access_group_id(&self) -> Result<String>;

    /// Submit one invalidation batch for `urls` under `group_id`.
    async fn invalidate_properties(
        &self,
        group_id: &str,
        urls: &[String],
    ) -> Result<InvalidationOutcome>;
}

/// Configuration for Level3Client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and authority requests are sent to
    pub base_url: String,
    /// Value of the `Host` header
    pub host: String,
    /// Per-call timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: format!("https://{}", API_SERVER),
            host: API_SERVER.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

pub struct Level3Client {
    http_client: Client,
    signer: RequestSigner,
    notification_email: String,
    config: ClientConfig,
}

impl Level3Client {
    pub fn new(signer: RequestSigner, notification_email: impl Into<String>) -> Result<Self> {
        Self::with_config(signer, notification_email, ClientConfig::default())
    }

    pub fn with_config(
        signer: RequestSigner,
        notification_email: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .redirect(wreq::redirect::Policy::none())
            .build()?;

        Ok(Self {
            http_client,
            signer,
            notification_email: notification_email.into(),
            config,
        })
    }

    fn url(&self, api_path: &str) -> String {
        format!(
            "{}{}?notification={}",
            self.config.base_url, api_path, self.notification_email
        )
    }

    /// Headers every call carries. The signature covers the exact `Date`
    /// value sent, so both are produced together here.
    fn signed_headers(&self, method: &str, api_path: &str) -> Result<HeaderMap> {
        let date = signer::date_now();
        let authorization = self
            .signer
            .authorization(&date, api_path, CONTENT_TYPE_XML, method, "");

        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, header_value(&self.config.host)?);
        headers.insert(header::AUTHORIZATION, header_value(&authorization)?);
        headers.insert(header::DATE, header_value(&date)?);
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_XML));
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| InvalidationError::InvalidInput(format!("bad header value: {}", e)))
}

/// Pull the first `accessGroup id="<digits>"` out of a key listing.
///
/// Accounts with several groups get the first one listed.
pub fn extract_access_group_id(body: &str) -> Option<String> {
    let re = Regex::new(r#"(?i)accessGroup id="(\d+)""#).ok()?;
    re.captures(body)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

impl InvalidationApi for Level3Client {
    async fn access_group_id(&self) -> Result<String> {
        let headers = self.signed_headers("GET", KEY_PATH)?;
        let response = self
            .http_client
            .get(self.url(KEY_PATH))
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, bytes = body.len(), "key listing received");

        if !status.is_success() {
            return Err(InvalidationError::RemoteCall(format!(
                "GET {} returned {}",
                KEY_PATH, status
            )));
        }

        extract_access_group_id(&body).ok_or_else(|| {
            InvalidationError::Configuration("no accessGroup id in key listing".to_string())
        })
    }

    async fn invalidate_properties(
        &self,
        group_id: &str,
        urls: &[String],
    ) -> Result<InvalidationOutcome> {
        let api_path = format!("{}/{}", INVALIDATIONS_PATH, group_id);
        let headers = self.signed_headers("POST", &api_path)?;
        let body = encode_ascii(&build_properties_xml(urls));
        tracing::debug!(path = %api_path, bytes = body.len(), "submitting invalidation");

        // Content-Length is derived from the encoded byte count of the body.
        let response = self
            .http_client
            .post(self.url(&api_path))
            .headers(headers)
            .body(body)
            .send()
            .await?;

        Ok(InvalidationOutcome {
            status: response.status().as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_group_id() {
        let body = r#"<accessGroups><accessGroup id="12345" name="Main"/></accessGroups>"#;
        assert_eq!(extract_access_group_id(body), Some("12345".to_string()));
    }

    #[test]
    fn test_extract_group_id_case_insensitive() {
        let body = r#"<ACCESSGROUP ID="42">"#;
        assert_eq!(extract_access_group_id(body), Some("42".to_string()));
    }

    #[test]
    fn test_extract_first_group_wins() {
        let body = r#"<accessGroup id="7"/><accessGroup id="8"/>"#;
        assert_eq!(extract_access_group_id(body), Some("7".to_string()));
    }

    #[test]
    fn test_extract_group_id_missing() {
        assert_eq!(extract_access_group_id("<keys></keys>"), None);
        assert_eq!(extract_access_group_id(r#"<accessGroup id="abc">"#), None);
    }

    #[test]
    fn test_outcome_only_200_accepted() {
        assert!(InvalidationOutcome { status: 200 }.accepted());
        for status in [201, 204, 302, 400, 401, 500] {
            assert!(!InvalidationOutcome { status }.accepted());
        }
    }

    #[tokio::test]
    async fn test_url_keeps_notification_verbatim() {
        let client = Level3Client::new(RequestSigner::new("K", "S"), "n@e.com").unwrap();
        assert_eq!(
            client.url(KEY_PATH),
            "https://ws.level3.com/key/v1.0?notification=n@e.com"
        );
    }

    #[tokio::test]
    async fn test_signed_headers() {
        let client = Level3Client::new(RequestSigner::new("K", "S"), "n@e.com").unwrap();
        let headers = client.signed_headers("GET", KEY_PATH).unwrap();

        assert_eq!(headers[header::HOST], "ws.level3.com");
        assert_eq!(headers[header::CONTENT_TYPE], "text/xml");

        let date = headers[header::DATE].to_str().unwrap();
        let expected =
            RequestSigner::new("K", "S").authorization(date, KEY_PATH, "text/xml", "GET", "");
        assert_eq!(headers[header::AUTHORIZATION], expected.as_str());
    }
}
