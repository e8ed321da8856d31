use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging.
///
/// - Emits JSON log lines via `tracing_subscriber`, filtered by `RUST_LOG`
///   (default `info`).
/// - Bridges `log` records (e.g. actix-web's `Logger`) into `tracing`.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry(service_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // with_current_span + with_span_list puts the active span stack (route, operation)
    // on every line.
    let formatting_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(formatting_layer)
        .try_init()?;

    if let Err(err) = tracing_log::LogTracer::init() {
        tracing::warn!(error = %err, "a `log` logger is already installed; log records stay with it");
    }

    tracing::info!(service = service_name, "telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_once() {
        assert!(init_telemetry("oauth-app-test").is_ok());
        assert!(init_telemetry("oauth-app-test").is_err());
    }
}
