//! Logger construction.
//!
//! The subscriber is turned into a [`Dispatch`] that the caller hands to the
//! components that log, instead of being installed as a process-wide global.

use tracing::Dispatch;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Builds a compact stdout logger filtered by `filter` (an `EnvFilter` directive).
pub fn build_dispatch(filter: &str) -> anyhow::Result<Dispatch> {
    let env_filter = EnvFilter::try_new(filter)?;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stdout);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    Ok(Dispatch::new(subscriber))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_per_target_directives() {
        assert!(build_dispatch("info,sqlx=warn").is_ok());
    }
}
