//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation for binaries and tests embedding fs-mirror.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::Verbosity;

/// Installs a global formatting subscriber filtered by `verbosity`.
///
/// When `RUST_LOG` is set it takes precedence over `verbosity`. Returns
/// `false` when a global subscriber was already installed, in which case the
/// existing one is left in place.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{Verbosity, init_tracing};
///
/// init_tracing(Verbosity::from_level(2));
/// tracing::debug!(target: "fs_mirror::apply", "created directory");
/// ```
pub fn init_tracing(verbosity: Verbosity) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));
    install(filter)
}

/// Installs a global formatting subscriber using explicit filter directives.
///
/// Invalid directives fall back to the [`Verbosity::Normal`] filter rather
/// than failing, since diagnostics must never prevent an update from running.
pub fn init_tracing_with_directives(directives: &str) -> bool {
    let filter = EnvFilter::try_new(directives)
        .unwrap_or_else(|_| EnvFilter::new(Verbosity::Normal.directives()));
    install(filter)
}

fn install(filter: EnvFilter) -> bool {
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_installation_reports_existing_subscriber() {
        // The first call may lose to another test; the second never wins.
        let _first = init_tracing_with_directives("fs_mirror=trace");
        let second = init_tracing(Verbosity::Quiet);
        assert!(!second);
    }

    #[test]
    fn directives_parse_as_env_filter() {
        for level in 0..=4 {
            let directives = Verbosity::from_level(level).directives();
            assert!(EnvFilter::try_new(&directives).is_ok(), "{directives}");
        }
        assert!(EnvFilter::try_new(Verbosity::Quiet.directives()).is_ok());
    }
}
