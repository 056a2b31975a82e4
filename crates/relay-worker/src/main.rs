use lambda_runtime::{service_fn, Error, LambdaEvent};
use relay_core::{InvocationResponse, RelayConfig};
use relay_infra::init_telemetry;
use relay_worker::Pipeline;
use std::sync::Arc;

async fn handle(
    pipeline: Arc<Pipeline>,
    event: LambdaEvent<serde_json::Value>,
) -> Result<InvocationResponse, Error> {
    let (payload, context) = event.into_parts();
    tracing::info!(request_id = %context.request_id, "Invocation received");
    Ok(pipeline.handle_event(payload).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_telemetry("relay-worker")?;

    let config = RelayConfig::from_env()?;
    tracing::info!(
        variant = %config.variant,
        storage_backend = %config.storage_backend,
        email_transport = %config.email_transport,
        "Configuration loaded"
    );

    // Built once per cold start; the upload counter inside lives as long as this process.
    let pipeline = Arc::new(Pipeline::from_config(config).await?);

    lambda_runtime::run(service_fn(move |event| handle(pipeline.clone(), event)))
        .await
}
