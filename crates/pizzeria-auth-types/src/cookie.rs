//! Cookie builders for the credentials remembered by the browser pages.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookies set by the admin login form.
pub const ADMIN_USERNAME_COOKIE: &str = "X-Username";
pub const ADMIN_PASSWORD_COOKIE: &str = "X-Password";

/// Cookies set by the delivery page.
pub const DELIVERY_USERNAME_COOKIE: &str = "user";
pub const DELIVERY_PASSWORD_COOKIE: &str = "pass";

/// Max-Age of the admin credential cookies in seconds (8 hours).
pub const ADMIN_COOKIE_MAX_AGE: i64 = 8 * 60 * 60;

fn credential_cookie(name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

/// Remember admin credentials on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use pizzeria_auth_types::cookie::{set_admin_cookies, ADMIN_USERNAME_COOKIE};
///
/// let jar = set_admin_cookies(CookieJar::new(), "admin".to_string(), "secret".to_string());
/// let cookie = jar.get(ADMIN_USERNAME_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "admin");
/// assert_eq!(cookie.path(), Some("/"));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_admin_cookies(jar: CookieJar, username: String, password: String) -> CookieJar {
    let max_age = Duration::seconds(ADMIN_COOKIE_MAX_AGE);
    jar.add(credential_cookie(ADMIN_USERNAME_COOKIE, username, max_age))
        .add(credential_cookie(ADMIN_PASSWORD_COOKIE, password, max_age))
}

/// Expire the admin credential cookies.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use pizzeria_auth_types::cookie::{clear_admin_cookies, set_admin_cookies, ADMIN_PASSWORD_COOKIE};
///
/// let jar = set_admin_cookies(CookieJar::new(), "admin".to_string(), "secret".to_string());
/// let jar = clear_admin_cookies(jar);
/// let cookie = jar.get(ADMIN_PASSWORD_COOKIE).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_admin_cookies(jar: CookieJar) -> CookieJar {
    jar.add(credential_cookie(ADMIN_USERNAME_COOKIE, String::new(), Duration::ZERO))
        .add(credential_cookie(ADMIN_PASSWORD_COOKIE, String::new(), Duration::ZERO))
}
