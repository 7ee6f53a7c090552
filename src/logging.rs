/// Tracing subscriber setup
///
/// Debug builds log at `debug`, release builds at `info`. `RUST_LOG`
/// overrides both. wgpu and friends are noisy at debug level, so they are
/// capped at `warn` unless `RUST_LOG` says otherwise.
use tracing_subscriber::EnvFilter;

fn default_directives() -> String {
    let level = if cfg!(debug_assertions) { "debug" } else { "info" };
    [level, "wgpu_core=warn", "wgpu_hal=warn", "naga=warn", "iced_wgpu=warn", "cosmic_text=warn"]
        .join(",")
}

/// Install the global subscriber. Call once, before the UI starts.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives()));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        eprintln!("tracing subscriber already installed");
    }
}
