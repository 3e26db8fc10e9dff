//! Tracing subscriber setup shared by the binary and embedding applications.

use crate::error::{GraphError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global `fmt` subscriber filtered by `level`.
///
/// `level` accepts any `EnvFilter` directive, e.g. `"info"` or
/// `"contagion=debug"`. Fails if the directive does not parse or a global
/// subscriber is already installed.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|e| GraphError::InvalidArgument(format!("Invalid log level: {e}")))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| GraphError::InvalidArgument("Logging already initialized".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        let err = init_logging("contagion=verbose").unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_second_initialisation() {
        // Whichever call installs the global subscriber, the next one must fail.
        let _ = init_logging("warn");
        let err = init_logging("info").unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
        assert!(err.to_string().contains("already initialized"), "{err}");
    }
}
