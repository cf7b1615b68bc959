//! Helpers for printing credentials without leaking them.

/// Show the first eight characters of a secret and hide the rest.
///
/// `"0123456789abcdef"` becomes `"01234567...***"`.
pub fn mask_secret(secret: &str) -> String {
    let head: String = secret.chars().take(8).collect();
    format!("{head}...***")
}

/// Show the first eight and last four characters of an access token.
///
/// Tokens too short to keep both ends are fully masked.
pub fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 12 {
        return "***".to_string();
    }
    let head: String = token.chars().take(8).collect();
    let tail: String = token.chars().skip(count - 4).collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_secret_keeps_prefix() {
        assert_eq!(mask_secret("0123456789abcdef"), "01234567...***");
        assert_eq!(mask_secret("abc"), "abc...***");
    }

    #[test]
    fn mask_token_keeps_both_ends() {
        assert_eq!(
            mask_token("aaaaaaaabbbbbbbbccccdddd"),
            "aaaaaaaa...dddd"
        );
    }

    #[test]
    fn mask_token_hides_short_tokens() {
        assert_eq!(mask_token("short"), "***");
        assert_eq!(mask_token(""), "***");
    }
}
