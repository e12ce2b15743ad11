//! Process-wide subscriber setup

use serde::Deserialize;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output profile, selectable from configuration as a lowercase string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Human-readable lines, debug level for the inverso crates
    #[default]
    Development,
    /// One JSON object per event, info level
    Production,
    /// No output; pair with `init_test_capture()`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(&self) -> Option<&'static str> {
        match self {
            Profile::Development => Some("inverso=debug"),
            Profile::Production => Some("inverso=info"),
            Profile::Test => None,
        }
    }

    fn filter(&self) -> EnvFilter {
        let fallback = self.default_directive().unwrap_or("off");
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

static INIT: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has any effect. If another subscriber
/// is already installed it is left in place.
pub fn init(profile: Profile) {
    INIT.call_once(|| match profile {
        Profile::Development => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(profile.filter())
                .try_init();
        }
        Profile::Production => {
            let _ = tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.filter())
                .try_init();
        }
        Profile::Test => {
            let _ = tracing_subscriber::registry().try_init();
        }
    });
}
