//! Credential helpers for router tests.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use pizzeria_auth_types::cookie::{ADMIN_PASSWORD_COOKIE, ADMIN_USERNAME_COOKIE};
use pizzeria_auth_types::credentials::{PASSWORD_HEADER, USERNAME_HEADER};

/// Username and password attached to test requests.
pub struct MockCredentials {
    pub username: String,
    pub password: String,
}

impl MockCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    /// Credentials in the `x-username`/`x-password` headers.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USERNAME_HEADER),
            HeaderValue::from_str(&self.username).unwrap(),
        );
        map.insert(
            HeaderName::from_static(PASSWORD_HEADER),
            HeaderValue::from_str(&self.password).unwrap(),
        );
        map
    }

    /// Credentials as the admin pages' cookies, as a `Cookie` header value.
    pub fn admin_cookie(&self) -> HeaderValue {
        HeaderValue::from_str(&format!(
            "{ADMIN_USERNAME_COOKIE}={}; {ADMIN_PASSWORD_COOKIE}={}",
            self.username, self.password
        ))
        .unwrap()
    }
}
