//! # Environment Variable Utilities
//!
//! Provides helpers for reading environment variables with common type conversions.
//! Includes parsing for boolean flags and trimmed string values with fallback defaults.
//!
//! Every helper takes the variable source as a provider function, so
//! configuration loading (e.g. `TimeMachineConfig`) and its tests share
//! one code path.
//!
//! # Examples
//! ```rust,no_run
//! use delorean_web::config::env::{read_flag_from, read_string_from};
//!
//! let env = |k: &str| std::env::var(k).ok();
//! let enabled = read_flag_from(env, "TIME_MACHINE_ENABLED", true);
//! let header = read_string_from(env, "TIME_MACHINE_HEADER_NAME", "X-Delorean-Time-Machine");
//! ```

/// Reads a boolean flag using a provider function.
///
/// Returns `true` for any of the following case-insensitive values:
/// `"1"`, `"true"`, `"yes"`, `"on"`.
///
/// # Example
/// ```rust
/// use delorean_web::config::env::read_flag_from;
///
/// let val = read_flag_from(|_| Some("true".into()), "ENABLE_FEATURE", false);
/// assert!(val);
/// ```
pub fn read_flag_from<F>(provider: F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(v) => {
            let s = v.trim().trim_matches(|c| c == '"' || c == '\'');
            matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        }
        None => default,
    }
}

/// Reads a trimmed string using a provider function, returning the given
/// default when the variable is unset or blank.
///
/// Surrounding whitespace and quote characters are stripped; a value that
/// becomes empty counts as unset and falls back to the default.
///
/// # Example
/// ```rust
/// use delorean_web::config::env::read_string_from;
///
/// let val = read_string_from(|_| Some("\"X-Custom\"".into()), "HEADER", "fallback");
/// assert_eq!(val, "X-Custom");
/// ```
pub fn read_string_from<F>(provider: F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(v) => {
            let s = v.trim().trim_matches(|c| c == '"' || c == '\'');
            if s.is_empty() {
                default.to_string()
            } else {
                s.to_string()
            }
        }
        None => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_flag_true_variants() {
        for val in ["1", "true", "TRUE", "yes", "YES", "on", "On"] {
            let got = read_flag_from(|_| Some(val.into()), "X", false);
            assert!(got, "Expected {val:?} to be truthy");
        }
    }

    #[test]
    fn test_read_flag_false_variants() {
        for val in ["0", "false", "no", "off", "xyz", ""] {
            let got = read_flag_from(|_| Some(val.into()), "X", true);
            assert!(!got, "Expected {val:?} to be falsy");
        }
    }

    #[test]
    fn test_read_flag_default_when_missing() {
        assert!(read_flag_from(|_| None, "X", true));
        assert!(!read_flag_from(|_| None, "X", false));
    }

    #[test]
    fn test_read_flag_strips_quotes() {
        assert!(read_flag_from(|_| Some("\"true\"".into()), "X", false));
        assert!(read_flag_from(|_| Some("'yes'".into()), "X", false));
    }

    #[test]
    fn test_read_string_returns_trimmed_value() {
        let got = read_string_from(|_| Some("  X-Custom-Header  ".into()), "H", "fallback");
        assert_eq!(got, "X-Custom-Header");
    }

    #[test]
    fn test_read_string_strips_quotes() {
        let got = read_string_from(|_| Some("\"Asia/Tokyo\"".into()), "TZ", "UTC");
        assert_eq!(got, "Asia/Tokyo");

        let got = read_string_from(|_| Some("'Asia/Tokyo'".into()), "TZ", "UTC");
        assert_eq!(got, "Asia/Tokyo");
    }

    #[test]
    fn test_read_string_default_when_missing_or_blank() {
        assert_eq!(read_string_from(|_| None, "X", "fallback"), "fallback");
        assert_eq!(read_string_from(|_| Some("".into()), "X", "fallback"), "fallback");
        assert_eq!(read_string_from(|_| Some("   ".into()), "X", "fallback"), "fallback");
    }
}
