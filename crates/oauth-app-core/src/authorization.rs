/// Extract the token from an `Authorization` header value.
///
/// Accepts `token <t>` and `bearer <t>` with a case-insensitive scheme.
/// Returns `None` for other schemes or an empty token.
pub fn parse_authorization_token(header: &str) -> Option<String> {
    let header = header.trim();
    let (scheme, rest) = header.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("token") && !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = rest.trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

/// First characters of a token, safe to put in logs.
pub fn token_prefix(token: &str) -> String {
    token.trim().chars().take(12).collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_token_and_bearer_schemes() {
        assert_eq!(
            parse_authorization_token("token token123").as_deref(),
            Some("token123")
        );
        assert_eq!(
            parse_authorization_token("Bearer  abc ").as_deref(),
            Some("abc")
        );
        assert_eq!(
            parse_authorization_token("TOKEN xyz").as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(parse_authorization_token("basic MDEyMzpzZWNyZXQ="), None);
        assert_eq!(parse_authorization_token("token "), None);
        assert_eq!(parse_authorization_token("token"), None);
        assert_eq!(parse_authorization_token(""), None);
    }

    #[test]
    fn token_prefix_is_bounded() {
        assert_eq!(token_prefix("gho_0123456789abcdef"), "gho_01234567");
        assert_eq!(token_prefix("short"), "short");
    }
}
