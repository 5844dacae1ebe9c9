//! Tracing setup shared by the service binaries

/// Initialize the stdout tracing subscriber with a per-crate filter
///
/// `log_level` overrides the base level for our own crates; noisy
/// HTTP-stack targets stay pinned at warn.
pub fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let base_level = log_level.unwrap_or("info");
    let env_filter = format!(
        "engine={base_level},webserver={base_level},shared={base_level},tower_http=warn,hyper=warn,reqwest=warn"
    );

    fmt()
        .with_env_filter(EnvFilter::new(&env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
