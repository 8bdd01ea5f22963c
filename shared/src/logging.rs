//! Logging utilities for consistent tracing across components

/// Initialize the tracing subscriber with component-level filtering.
///
/// `log_level` overrides the base level for our own crates; noisy
/// dependencies stay at `warn` regardless.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let base_level = log_level.unwrap_or("info");
    let env_filter = format!("analyzer={base_level},shared={base_level},reqwest=warn,hyper=warn");

    fmt()
        .with_env_filter(EnvFilter::new(&env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
