//! Where a run gets its credentials, URLs, and notification address from.
//!
//! Two sources are provided: positional command-line arguments, and the
//! deployment tool's parameter store exposed through environment variables.

use crate::error::{InvalidationError, Result};

pub const ENV_API_KEY: &str = "LEVEL3_API_KEY";
pub const ENV_API_SECRET: &str = "LEVEL3_API_SECRET";
pub const ENV_URLS: &str = "LEVEL3_INVALIDATION_URLS";
pub const ENV_NOTIFICATION_EMAIL: &str = "LEVEL3_NOTIFICATION_EMAIL";

const USAGE: &str = "expected <api_key> <api_secret> <urls_separated_by_comma> <notification_email>";

/// Everything one invalidation run needs.
#[derive(Clone)]
pub struct InvalidationInput {
    pub api_key: String,
    pub api_secret: String,
    pub urls_separated_by_comma: String,
    pub notification_email: String,
}

impl InvalidationInput {
    /// Target URLs in input order, empty segments dropped.
    pub fn urls(&self) -> Vec<String> {
        split_urls(&self.urls_separated_by_comma)
    }
}

impl std::fmt::Debug for InvalidationInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvalidationInput")
            .field("api_key", &self.api_key)
            .field("api_secret", &mask_secret(&self.api_secret))
            .field("urls_separated_by_comma", &self.urls_separated_by_comma)
            .field("notification_email", &self.notification_email)
            .finish()
    }
}

/// Split a comma-separated URL list, dropping empty segments.
///
/// Segments are kept verbatim otherwise; no trimming or deduplication.
pub fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Mask a secret for log output, keeping only its last four characters.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }
    let tail: String = secret.chars().skip(len - 4).collect();
    format!("{}{}", "*".repeat(len - 4), tail)
}

/// A source the run input is read from, chosen at startup.
pub trait InputSource {
    fn read(&self) -> Result<InvalidationInput>;
}

/// Positional arguments: `<api_key> <api_secret> <urls> <email>`.
///
/// `args` excludes the program name. Extra trailing arguments are ignored.
#[derive(Debug, Clone)]
pub struct ArgsInput {
    args: Vec<String>,
}

impl ArgsInput {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }
}

impl InputSource for ArgsInput {
    fn read(&self) -> Result<InvalidationInput> {
        match self.args.as_slice() {
            [api_key, api_secret, urls, email, ..] => Ok(InvalidationInput {
                api_key: api_key.clone(),
                api_secret: api_secret.clone(),
                urls_separated_by_comma: urls.clone(),
                notification_email: email.clone(),
            }),
            _ => Err(InvalidationError::InvalidInput(format!(
                "{} (got {} argument(s))",
                USAGE,
                self.args.len()
            ))),
        }
    }
}

/// Parameter-store variant: values injected by the deployment tool as
/// environment variables.
pub struct EnvInput<F = fn(&str) -> Option<String>> {
    lookup: F,
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl EnvInput {
    /// Read from the process environment.
    pub fn from_process_env() -> Self {
        Self {
            lookup: process_env,
        }
    }
}

impl<F> EnvInput<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Read through a custom lookup, e.g. a map in tests.
    pub fn with_lookup(lookup: F) -> Self {
        Self { lookup }
    }

    fn require(&self, name: &str) -> Result<String> {
        (self.lookup)(name)
            .ok_or_else(|| InvalidationError::InvalidInput(format!("missing parameter {}", name)))
    }
}

impl<F> InputSource for EnvInput<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn read(&self) -> Result<InvalidationInput> {
        Ok(InvalidationInput {
            api_key: self.require(ENV_API_KEY)?,
            api_secret: self.require(ENV_API_SECRET)?,
            urls_separated_by_comma: self.require(ENV_URLS)?,
            notification_email: self.require(ENV_NOTIFICATION_EMAIL)?,
        })
    }
}
