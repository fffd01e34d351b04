//! Tracing setup: `tracing` spans exported as OpenTelemetry OTLP/JSON.
//!
//! The plugin runs inside Zellij's WASI sandbox, where the host home
//! directory is mounted at `/host`. Spans are written to
//! `/host/.local/share/zellij/rollcall/rollcall-otlp.json`, one batch per line,
//! rotated by size.

mod exporter;
mod file_writer;
mod otlp_json;

pub use file_writer::{RotatingFile, RotationPolicy};

use crate::domain::error::Result;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported in the trace resource.
pub const SERVICE_NAME: &str = "Rollcall";

/// Directory the plugin writes its data to, as seen from the sandbox.
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("rollcall")
}

/// Trace file inside [`data_dir`].
#[must_use]
pub fn trace_file() -> PathBuf {
    data_dir().join("rollcall-otlp.json")
}

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` and an OpenTelemetry layer exporting to
/// [`trace_file`].
///
/// Calling it again after a subscriber is installed is a no-op.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the filter
/// directive does not parse.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.trace_level).map_err(|e| {
        crate::RollcallError::Config(format!("invalid trace_level {:?}: {e}", config.trace_level))
    })?;

    std::fs::create_dir_all(data_dir())?;

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::tracer_provider(trace_file(), RotationPolicy::default(), resource);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)));

    let _ = subscriber.try_init();
    Ok(())
}
