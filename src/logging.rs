//! Logging initialisation.
//!
//! Logs are written to stderr so they never interleave with the console
//! feedback printed on stdout.

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "recordbook=info";

/// Output format of the tracing subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
    /// No subscriber installed.
    Off,
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`. Later calls are no-ops.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter =
            || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        match profile {
            Profile::Pretty => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter())
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Json => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter())
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Off => {}
        }
    });
}
