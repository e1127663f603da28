//! Observability setup for AutoLearn binaries.

pub mod tracing_setup;
