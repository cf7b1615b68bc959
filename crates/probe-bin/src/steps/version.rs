use crate::output;
use crate::ProbeFailure;
use media_server_api::{check_server_version, PublicSystemInfo, VersionCheck};

/// Step 2: minimum server version.
pub fn check_version(info: &PublicSystemInfo, required: &str) -> Result<VersionCheck, ProbeFailure> {
    let current = info.version.as_deref().unwrap_or("0.0.0");
    output::step(2, &format!("Version check: server={current}, required>={required}"));

    let check = check_server_version(current, required);
    if !check.compatible {
        output::fail("Server version too old. TV would show: 'Please update it and restart the app'");
        return Err(ProbeFailure::Compatibility {
            current: current.to_string(),
            required: required.to_string(),
        });
    }

    output::ok("Version is compatible.");
    if check.lexicographic_mismatch {
        output::warn("The TV app compares versions as strings and would reject this server.");
        output::detail(&format!("('{current}' < '{required}' lexicographically)"));
        output::detail("ServerVersion.js needs a numeric comparison for this to work on the TV.");
    }
    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(version: Option<&str>) -> PublicSystemInfo {
        PublicSystemInfo {
            version: version.map(String::from),
            ..PublicSystemInfo::default()
        }
    }

    #[test]
    fn test_compatible_with_string_comparison_warning() {
        let check = check_version(&info(Some("10.11.2")), "10.3.2").unwrap();
        assert!(check.lexicographic_mismatch);
    }

    #[test]
    fn test_too_old_is_fatal() {
        let failure = check_version(&info(Some("10.2.0")), "10.3.2").unwrap_err();
        assert_eq!(
            failure,
            ProbeFailure::Compatibility {
                current: "10.2.0".into(),
                required: "10.3.2".into()
            }
        );
    }

    #[test]
    fn test_missing_version_is_treated_as_zero() {
        assert!(check_version(&info(None), "10.3.2").is_err());
    }
}
