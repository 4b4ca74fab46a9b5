//! Observability infrastructure: tracing and health checks.
//!
//! The store itself stays silent; logging happens in the daemon and CLI,
//! on top of the subscriber installed here.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod health;

/// Initialize the global tracing subscriber.
///
/// This must be called once at application startup before any other
/// operations.
///
/// # Panics
/// Panics if called more than once.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_target(true).with_level(true))
        .init();

    Ok(())
}
