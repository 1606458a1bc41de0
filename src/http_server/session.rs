//! Session cookie handling
//!
//! The raw session token travels in a plain cookie. Each request resolves
//! it against the session store held in router state.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap, HeaderValue},
};

use crate::auth::SessionUser;

use super::errors::AppError;
use super::state::AppState;

/// Per-request session context
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Raw token from the cookie, if one was sent
    pub token: Option<String>,
    /// The logged-in user, if the token maps to a live session
    pub user: Option<SessionUser>,
}

impl SessionContext {
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = cookie_value(&parts.headers, state.cookie_name());
        let user = match &token {
            Some(token) => state.auth.current_user(token)?,
            None => None,
        };
        Ok(Self { token, user })
    }
}

/// First value of the named cookie across all `Cookie` headers
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `Set-Cookie` value opening a session
pub fn session_cookie(name: &str, token: &str, max_age_secs: i64) -> HeaderValue {
    let value = format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// `Set-Cookie` value removing the session cookie
pub fn clear_cookie(name: &str) -> HeaderValue {
    let value = format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static(""))
}
