//! Runs one invalidation end to end.
//!
//! Flow:
//! 1. Split the URL list
//! 2. Resolve the account's access group
//! 3. Submit every URL in a single invalidation batch
//!
//! Any failure stops the run; nothing is retried.

use crate::client::{InvalidationApi, Level3Client};
use crate::error::{InvalidationError, Result};
use crate::input::{InputSource, InvalidationInput, mask_secret};
use crate::progress::ProgressLog;
use crate::signer::RequestSigner;

pub const STARTED: &str = "Cache Invalidation Started";
pub const COMPLETED: &str = "Cache Invalidation Submission Completed";

/// Drive `api` through one run for `input`, reporting to `log`.
pub async fn run_invalidation<A, L>(api: &A, input: &InvalidationInput, log: &L) -> Result<()>
where
    A: InvalidationApi,
    L: ProgressLog + ?Sized,
{
    log.line(STARTED);

    let urls = input.urls();

    log.line(&format!(
        "InvalidateCache Key={}, Secret={}, Notification={}",
        input.api_key,
        mask_secret(&input.api_secret),
        input.notification_email
    ));

    let group_id = api.access_group_id().await?;
    log.line(&format!("AccessGroupId={}", group_id));
    if group_id.is_empty() {
        return Err(InvalidationError::Configuration(
            "empty access group id".to_string(),
        ));
    }

    for url in &urls {
        log.line(&format!("Invalidating Url={}", url));
    }

    let outcome = api.invalidate_properties(&group_id, &urls).await?;
    log.line(&format!("InvalidationResult={}", outcome.accepted()));
    if !outcome.accepted() {
        return Err(InvalidationError::InvalidationRejected {
            status: outcome.status,
        });
    }

    log.line(COMPLETED);
    Ok(())
}

/// Read input from `source` and run against the live API.
pub async fn invalidate_from<S, L>(source: &S, log: &L) -> Result<()>
where
    S: InputSource + ?Sized,
    L: ProgressLog + ?Sized,
{
    let input = source.read()?;
    let signer = RequestSigner::new(input.api_key.clone(), input.api_secret.clone());
    let client = Level3Client::new(signer, input.notification_email.clone())?;
    run_invalidation(&client, &input, log).await
}
