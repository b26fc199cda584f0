//! Per-request credentials extractor.
//!
//! There are no sessions: every admin or delivery request carries a username
//! and password, which the service re-verifies against storage.

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use http::request::Parts;
use http::{HeaderMap, StatusCode};

use crate::cookie::{
    ADMIN_PASSWORD_COOKIE, ADMIN_USERNAME_COOKIE, DELIVERY_PASSWORD_COOKIE,
    DELIVERY_USERNAME_COOKIE,
};

pub const USERNAME_HEADER: &str = "x-username";
pub const PASSWORD_HEADER: &str = "x-password";

/// Username and password presented with a request.
///
/// Looked up in order: the `x-username`/`x-password` headers, the
/// `X-Username`/`X-Password` cookies, then the `user`/`pass` cookies.
/// A source only counts when both values are present and non-empty.
///
/// Returns 401 when no source yields credentials. Verification and role
/// checks happen in the service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Resolve credentials from request headers, including the `Cookie` header.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        if let Some(found) = Self::non_empty(header(USERNAME_HEADER), header(PASSWORD_HEADER)) {
            return Some(found);
        }

        let jar = CookieJar::from_headers(headers);
        let cookie = |name: &str| jar.get(name).map(|c| c.value().to_owned());
        Self::non_empty(cookie(ADMIN_USERNAME_COOKIE), cookie(ADMIN_PASSWORD_COOKIE)).or_else(
            || Self::non_empty(cookie(DELIVERY_USERNAME_COOKIE), cookie(DELIVERY_PASSWORD_COOKIE)),
        )
    }

    fn non_empty(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self { username, password })
            }
            _ => None,
        }
    }
}

impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Values are pulled out synchronously so the returned future does not
    // borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let credentials = Self::from_headers(&parts.headers);
        async move { credentials.ok_or(StatusCode::UNAUTHORIZED) }
    }
}
