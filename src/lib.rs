pub mod client;
pub mod error;
pub mod input;
pub mod invalidator;
pub mod payload;
pub mod progress;
pub mod signer;

pub use client::{ClientConfig, InvalidationApi, InvalidationOutcome, Level3Client};
pub use error::InvalidationError;
pub use input::{ArgsInput, EnvInput, InputSource, InvalidationInput, split_urls};
pub use invalidator::{invalidate_from, run_invalidation};
pub use progress::{ProgressLog, TracingProgress};
pub use signer::RequestSigner;
