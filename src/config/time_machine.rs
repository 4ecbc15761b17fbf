//! # Time Machine Configuration
//!
//! Provides the configuration for time virtualization: the master switch,
//! header and cookie names, control endpoint prefix, and reference zone.
//!
//! This configuration is typically initialized once at application startup
//! and shared throughout the system. Safe defaults keep cookie acceptance
//! and the control endpoints off unless explicitly enabled; they are meant
//! for test and staging environments, not for production.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `TIME_MACHINE_ENABLED` | Master switch for all virtualization | `true` |
//! | `TIME_MACHINE_HEADER_NAME` | Inbound override header | `"X-Delorean-Time-Machine"` |
//! | `TIME_MACHINE_INBOUND_ENABLED` | Accept overrides from incoming requests | `true` |
//! | `TIME_MACHINE_OUTBOUND_ENABLED` | Stamp overrides onto outgoing requests | `true` |
//! | `TIME_MACHINE_OUTBOUND_HEADER_NAME` | Outbound override header | `"X-Delorean-Time-Machine"` |
//! | `TIME_MACHINE_COOKIE_ENABLED` | Accept overrides from cookies, serve control endpoints | `false` |
//! | `TIME_MACHINE_COOKIE_NAME` | Override cookie name | `"Delorean-Time-Machine"` |
//! | `TIME_MACHINE_COOKIE_PATH` | Path attribute of issued cookies | `"/"` |
//! | `TIME_MACHINE_CONTROL_PATH` | Mount prefix of the control endpoints | `"time-machine"` |
//! | `TIME_MACHINE_ZONE` | IANA reference zone of the virtual clock | `"UTC"` |
//!
//! # Example
//! ```rust,no_run
//! use delorean_web::config::time_machine::TimeMachineConfig;
//!
//! let cfg = TimeMachineConfig::from_env();
//! if cfg.enabled {
//!     println!("time machine listens on {}", cfg.header_name);
//! }
//! ```

use crate::config::env::{read_flag_from, read_string_from};

/// Default name of the inbound and outbound override headers.
pub const DEFAULT_HEADER_NAME: &str = "X-Delorean-Time-Machine";
/// Default name of the override cookie.
pub const DEFAULT_COOKIE_NAME: &str = "Delorean-Time-Machine";
/// Default path attribute of issued override cookies.
pub const DEFAULT_COOKIE_PATH: &str = "/";
/// Default mount prefix of the control endpoints.
pub const DEFAULT_CONTROL_PATH: &str = "time-machine";
/// Default IANA reference zone of the virtual clock.
pub const DEFAULT_ZONE: &str = "UTC";

/// Top-level time machine configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeMachineConfig {
    /// Master switch. When `false`, inbound binding, outbound stamping,
    /// and the control endpoints all become no-ops.
    pub enabled: bool,
    /// Name of the header carrying an override on incoming requests.
    pub header_name: String,
    /// Whether incoming requests may carry an override at all.
    pub inbound_enabled: bool,
    /// Outbound stamping of the active override.
    pub outbound: OutboundConfig,
    /// Cookie acceptance and the control endpoints.
    pub cookie: CookieConfig,
    /// Mount prefix of the control endpoints, without leading slash.
    pub control_path: String,
    /// IANA zone the virtual clock answers in.
    pub zone: String,
}

/// Configuration for stamping the active override onto outgoing requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundConfig {
    /// Whether outgoing requests are stamped while an override is active.
    pub enabled: bool,
    /// Name of the header stamped onto outgoing requests.
    pub name: String,
}

/// Configuration for the override cookie.
///
/// Enabling the cookie also enables the control endpoints that manage it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    /// Whether cookie values are read and the control endpoints served.
    pub enabled: bool,
    /// Name of the override cookie.
    pub name: String,
    /// Path attribute written on issued and expired cookies.
    pub path: String,
}

impl Default for TimeMachineConfig {
    fn default() -> Self {
        Self::from_env_with(|_| None)
    }
}

impl TimeMachineConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Example
    /// ```rust,no_run
    /// use delorean_web::config::time_machine::TimeMachineConfig;
    ///
    /// let cfg = TimeMachineConfig::from_env();
    /// assert!(!cfg.header_name.is_empty());
    /// ```
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Loads configuration using a custom key provider (for testing/mocking).
    pub fn from_env_with<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            enabled: read_flag_from(&get, "TIME_MACHINE_ENABLED", true),
            header_name: read_string_from(&get, "TIME_MACHINE_HEADER_NAME", DEFAULT_HEADER_NAME),
            inbound_enabled: read_flag_from(&get, "TIME_MACHINE_INBOUND_ENABLED", true),
            outbound: OutboundConfig {
                enabled: read_flag_from(&get, "TIME_MACHINE_OUTBOUND_ENABLED", true),
                name: read_string_from(
                    &get,
                    "TIME_MACHINE_OUTBOUND_HEADER_NAME",
                    DEFAULT_HEADER_NAME,
                ),
            },
            cookie: CookieConfig {
                enabled: read_flag_from(&get, "TIME_MACHINE_COOKIE_ENABLED", false),
                name: read_string_from(&get, "TIME_MACHINE_COOKIE_NAME", DEFAULT_COOKIE_NAME),
                path: read_string_from(&get, "TIME_MACHINE_COOKIE_PATH", DEFAULT_COOKIE_PATH),
            },
            control_path: read_string_from(&get, "TIME_MACHINE_CONTROL_PATH", DEFAULT_CONTROL_PATH),
            zone: read_string_from(&get, "TIME_MACHINE_ZONE", DEFAULT_ZONE),
        }
    }
}
