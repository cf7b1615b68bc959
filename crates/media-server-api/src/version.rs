//! Server version gate.
//!
//! The TV compares version strings lexicographically, which rejects
//! `10.11.x` against a `10.3.2` minimum. Numeric comparison decides here;
//! the lexicographic result is kept so the caller can warn about it.

/// Dotted version as integers. Any non-numeric component yields `[0]`.
pub fn parse_version(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|part| part.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|_| vec![0])
}

/// Outcome of comparing the server version with the minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    pub current: String,
    pub required: String,
    /// Numeric comparison passed.
    pub compatible: bool,
    /// Compatible, but the TV's string comparison would reject it.
    pub lexicographic_mismatch: bool,
}

pub fn check_server_version(current: &str, required: &str) -> VersionCheck {
    let compatible = parse_version(current) >= parse_version(required);
    VersionCheck {
        current: current.to_string(),
        required: required.to_string(),
        compatible,
        lexicographic_mismatch: compatible && current < required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("10.3.2"), vec![10, 3, 2]);
        assert_eq!(parse_version("10.11"), vec![10, 11]);
        assert_eq!(parse_version("10.9.0-beta"), vec![0]);
        assert_eq!(parse_version(""), vec![0]);
    }

    #[test]
    fn test_newer_minor_is_compatible_with_warning() {
        let check = check_server_version("10.11.2", "10.3.2");
        assert!(check.compatible);
        assert!(check.lexicographic_mismatch);
    }

    #[test]
    fn test_equal_and_plain_newer() {
        let equal = check_server_version("10.3.2", "10.3.2");
        assert!(equal.compatible);
        assert!(!equal.lexicographic_mismatch);

        let newer = check_server_version("10.8.13", "10.3.2");
        assert!(newer.compatible);
        assert!(!newer.lexicographic_mismatch);
    }

    #[test]
    fn test_older_is_incompatible() {
        let check = check_server_version("10.2.0", "10.3.2");
        assert!(!check.compatible);
        assert!(!check.lexicographic_mismatch);
    }

    #[test]
    fn test_unparsable_compares_as_zero() {
        let check = check_server_version("unknown", "10.3.2");
        assert!(!check.compatible);
    }
}
