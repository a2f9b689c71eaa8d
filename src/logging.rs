use tracing_subscriber::{fmt, EnvFilter};

fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("meal_prep={}", level)
}

/// Installs the global fmt subscriber. Call once, from the binary entry point.
/// `RUST_LOG` wins when set; otherwise each `-v` lowers the threshold one step
/// from `warn`.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
