//! Session cookie handling.

use axum::http::{header, HeaderMap};

use pantry_core::SessionId;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "pantry_session";

/// Pull the session token out of the request's cookies, if present.
///
/// Anything unparseable is treated as no session at all.
pub fn session_token(headers: &HeaderMap) -> Option<SessionId> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

/// The `Set-Cookie` value establishing a session.
pub fn set_session_cookie(token: &SessionId) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

/// The `Set-Cookie` value clearing the session.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_token_extraction() {
        let token = SessionId::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=darkly; {}={}", SESSION_COOKIE, token)).unwrap(),
        );
        assert_eq!(session_token(&headers), Some(token));
    }

    #[test]
    fn test_missing_or_garbage_cookie() {
        assert_eq!(session_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("pantry_session=not-a-uuid"),
        );
        assert_eq!(session_token(&headers), None);
    }
}
