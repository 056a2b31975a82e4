use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "relay_replay=info,relay_core=info,relay_storage=info,\
    relay_processing=info,relay_infra=info,relay_worker=info";

/// Initialize tracing with a JSON formatter.
///
/// Timestamps are left out because the log collector stamps every line.
pub fn init_telemetry(service_name: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_ansi(false)
                .without_time()
                .with_target(true),
        )
        .try_init()?;

    tracing::info!(service = %service_name, "Telemetry initialized");
    Ok(())
}

pub async fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}
