//! Tracing subscriber setup for the host binary.

use tracing_subscriber::EnvFilter;

/// Workspace crate targets that receive log output.
const CRATE_TARGETS: &[&str] = &["rotary", "rotary_clock", "rotary_ui", "rotary_shared"];

/// Builds the default filter directive for `level`.
#[must_use]
pub fn default_directives(level: &str) -> String {
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing at `level` for the workspace crates.
///
/// `RUST_LOG` overrides the configured level if set. Logs go to stderr so
/// they stay out of the frames drawn on stdout.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_every_crate() {
        let directives = default_directives("debug");
        assert_eq!(
            directives,
            "rotary=debug,rotary_clock=debug,rotary_ui=debug,rotary_shared=debug"
        );
    }
}
