//! Observability setup for Herald: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
