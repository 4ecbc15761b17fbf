//! Time zone name handling shared by the clock layer.

use std::str::FromStr;

use chrono_tz::Tz;
use thiserror::Error;

/// A time zone name that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    /// The name was empty or whitespace only.
    #[error("time zone name is empty")]
    Empty,
    /// The name is not in the IANA tz database.
    #[error("unknown time zone name: {0:?}")]
    Unknown(String),
}

/// Resolves an IANA zone name such as `Asia/Tokyo` or `UTC`.
///
/// Leading and trailing whitespace is ignored.
pub fn parse_zone(name: &str) -> Result<Tz, ZoneError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ZoneError::Empty);
    }
    Tz::from_str(name).map_err(|_| ZoneError::Unknown(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_zone_names() {
        assert_eq!(parse_zone("UTC"), Ok(chrono_tz::UTC));
        assert_eq!(parse_zone("Asia/Tokyo"), Ok(chrono_tz::Asia::Tokyo));
        assert_eq!(parse_zone(" America/New_York "), Ok(chrono_tz::America::New_York));
    }

    #[test]
    fn rejects_empty_names() {
        assert_eq!(parse_zone(""), Err(ZoneError::Empty));
        assert_eq!(parse_zone("   "), Err(ZoneError::Empty));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            parse_zone("Mars/Olympus_Mons"),
            Err(ZoneError::Unknown("Mars/Olympus_Mons".to_string()))
        );
    }

    #[test]
    fn unknown_zone_error_names_the_input() {
        let err = parse_zone("Nowhere/Special").unwrap_err();
        assert!(err.to_string().contains("Nowhere/Special"));
    }
}
