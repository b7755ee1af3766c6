use std::env;

use anyhow::{Context, Result};
use level3_purge::{ArgsInput, EnvInput, InputSource, TracingProgress, invalidate_from};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "level3_purge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Positional arguments win; without any, fall back to the deployment
    // tool's parameters.
    let args: Vec<String> = env::args().skip(1).collect();
    let source: Box<dyn InputSource> = if args.is_empty() {
        Box::new(EnvInput::from_process_env())
    } else {
        Box::new(ArgsInput::new(args))
    };

    if let Err(err) = invalidate_from(source.as_ref(), &TracingProgress).await {
        tracing::error!("{}", err);
        return Err(err).context("Cache invalidation failed");
    }

    Ok(())
}
