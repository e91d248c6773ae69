use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::types::{Session, TokenPair};

/// Access-token cookie name (fixed, shared with the backend contract).
pub const ACCESS_COOKIE: &str = "access_token";
/// Refresh-token cookie name (fixed, shared with the backend contract).
pub const REFRESH_COOKIE: &str = "refresh_token";

const ACCESS_MAX_AGE: Duration = Duration::minutes(15);
const REFRESH_MAX_AGE: Duration = Duration::days(7);

/// Create the access + refresh cookies for a fresh token pair.
///
/// Max-ages are fixed policy, not derived from token content.
#[must_use]
pub fn session_cookies(tokens: &TokenPair, secure: bool) -> (Cookie<'static>, Cookie<'static>) {
    let access = Cookie::build((ACCESS_COOKIE, tokens.access.clone()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(ACCESS_MAX_AGE)
        .build();

    let refresh = Cookie::build((REFRESH_COOKIE, tokens.refresh.clone()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(REFRESH_MAX_AGE)
        .build();

    (access, refresh)
}

/// Create removal cookies for both tokens.
///
/// Idempotent: clearing already-absent cookies is a no-op at the client.
#[must_use]
pub fn clear_session_cookies() -> (Cookie<'static>, Cookie<'static>) {
    let access = Cookie::build((ACCESS_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build();

    let refresh = Cookie::build((REFRESH_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build();

    (access, refresh)
}

/// Read the session from the request's cookie jar.
#[must_use]
pub fn session_from_jar(jar: &CookieJar) -> Session {
    Session::new(
        jar.get(ACCESS_COOKIE).map(|c| c.value().to_string()),
        jar.get(REFRESH_COOKIE).map(|c| c.value().to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access: "a1".into(),
            refresh: "r1".into(),
        }
    }

    #[test]
    fn set_cookie_attributes() {
        let (access, refresh) = session_cookies(&pair(), true);

        for cookie in [&access, &refresh] {
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.secure(), Some(true));
            assert_eq!(cookie.same_site(), Some(SameSite::Lax));
            assert_eq!(cookie.path(), Some("/"));
        }
        assert_eq!(access.name(), ACCESS_COOKIE);
        assert_eq!(access.value(), "a1");
        assert_eq!(access.max_age(), Some(Duration::minutes(15)));
        assert_eq!(refresh.name(), REFRESH_COOKIE);
        assert_eq!(refresh.value(), "r1");
        assert_eq!(refresh.max_age(), Some(Duration::days(7)));
    }

    #[test]
    fn secure_flag_follows_environment() {
        let (access, _) = session_cookies(&pair(), false);
        assert_eq!(access.secure(), Some(false));
    }

    #[test]
    fn clear_cookies_expire_immediately() {
        let (access, refresh) = clear_session_cookies();

        for cookie in [&access, &refresh] {
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
            assert_eq!(cookie.path(), Some("/"));
        }
    }

    #[test]
    fn session_from_populated_jar() {
        let jar = CookieJar::new()
            .add(Cookie::new(ACCESS_COOKIE, "a1"))
            .add(Cookie::new(REFRESH_COOKIE, "r1"));

        let session = session_from_jar(&jar);
        assert_eq!(session.access_token.as_deref(), Some("a1"));
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
    }

    #[test]
    fn session_from_empty_jar() {
        let session = session_from_jar(&CookieJar::new());
        assert_eq!(session, Session::default());
    }
}
