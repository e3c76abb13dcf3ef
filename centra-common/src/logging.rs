//! Logging setup shared by the command-line tools.
//!
//! Maps the `-v` occurrence count onto a default log level; `RUST_LOG`
//! still wins when set.

/// Default filter string for a `-v` occurrence count.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize `env_logger`, logging to stderr.
pub fn init(verbosity: u8) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter(verbosity)),
    )
    .target(env_logger::Target::Stderr)
    .init();
}

#[cfg(test)]
mod tests {
    use super::default_filter;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(1), "info");
        assert_eq!(default_filter(2), "debug");
        assert_eq!(default_filter(9), "debug");
    }
}
