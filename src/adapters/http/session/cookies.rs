//! Session cookies.
//!
//! | Cookie          | Path                   | Content            |
//! |-----------------|------------------------|--------------------|
//! | `token`         | `/`                    | access JWT         |
//! | `refresh_token` | `/api/v1/auth/refresh` | opaque refresh key |

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::adapters::http::middleware::ACCESS_COOKIE;

pub const REFRESH_COOKIE: &str = "refresh_token";
pub const REFRESH_COOKIE_PATH: &str = "/api/v1/auth/refresh";

fn session_cookie(
    name: &'static str,
    value: String,
    path: &'static str,
    max_age_secs: u64,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path(path)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(Duration::seconds(i64::try_from(max_age_secs).unwrap_or(i64::MAX)))
        .build()
}

pub fn with_access_cookie(jar: CookieJar, token: String, ttl_secs: u64, secure: bool) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, token, "/", ttl_secs, secure))
}

pub fn with_refresh_cookie(jar: CookieJar, token: String, ttl_secs: u64, secure: bool) -> CookieJar {
    jar.add(session_cookie(
        REFRESH_COOKIE,
        token,
        REFRESH_COOKIE_PATH,
        ttl_secs,
        secure,
    ))
}

/// Overwrites both cookies with empty, already-expired values.
pub fn cleared(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, String::new(), "/", 0, secure))
        .add(session_cookie(
            REFRESH_COOKIE,
            String::new(),
            REFRESH_COOKIE_PATH,
            0,
            secure,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_cookie_attributes() {
        let jar = with_access_cookie(CookieJar::new(), "jwt".into(), 900, true);
        let cookie = jar.get(ACCESS_COOKIE).unwrap();

        assert_eq!(cookie.value(), "jwt");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(900)));
    }

    #[test]
    fn refresh_cookie_is_scoped_to_refresh_path() {
        let jar = with_refresh_cookie(CookieJar::new(), "opaque".into(), 60, false);
        let cookie = jar.get(REFRESH_COOKIE).unwrap();

        assert_eq!(cookie.path(), Some(REFRESH_COOKIE_PATH));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn cleared_cookies_expire_immediately() {
        let jar = cleared(CookieJar::new(), false);
        for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        }
    }
}
