use tracing_subscriber::EnvFilter;

/// Initialise logging. With `debug` the default level is `debug` and `RUST_LOG`
/// may override it; otherwise the level is fixed at `info`.
pub fn init(debug: bool) {
    let filter = build_filter(debug, std::env::var("RUST_LOG").ok().as_deref());

    // A second init (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

fn build_filter(debug: bool, rust_log: Option<&str>) -> EnvFilter {
    // With debug off the level is forced to `info` even if `RUST_LOG` is set,
    // so a stray variable in the user's environment cannot turn on verbose output.
    if !debug {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("debug"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn rust_log_is_ignored_without_debug() {
        let filter = build_filter(false, Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn rust_log_overrides_debug_default() {
        assert_eq!(build_filter(true, Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(build_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
