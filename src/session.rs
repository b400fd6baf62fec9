use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

pub const SESSION_COOKIE: &str = "mgl_session";

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sid: String,
    is_admin: bool,
    #[serde(default)]
    flash: Vec<String>,
    exp: usize,
}

/// Signing material for session cookies.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn sign(&self, session: &Session) -> AppResult<String> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;
        let claims = SessionClaims {
            sid: session.sid.to_string(),
            is_admin: session.is_admin,
            flash: session.flash.clone(),
            exp: expiration.timestamp() as usize,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Decode a token; anything tampered, expired or malformed is `None`.
    pub fn open(&self, token: &str) -> Option<Session> {
        let decoded =
            decode::<SessionClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
                .ok()?;
        let claims = decoded.claims;
        Some(Session {
            sid: Uuid::parse_str(&claims.sid).unwrap_or_else(|_| Uuid::new_v4()),
            is_admin: claims.is_admin,
            flash: claims.flash,
            dirty: false,
        })
    }

    /// Session carried by the request's cookie, or a fresh anonymous one.
    pub fn read(&self, headers: &HeaderMap) -> Session {
        cookie_value(headers, SESSION_COOKIE)
            .and_then(|token| self.open(token))
            .unwrap_or_else(Session::anonymous)
    }

    pub fn set_cookie(&self, session: &Session) -> AppResult<HeaderValue> {
        let token = self.sign(session)?;
        let cookie = format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl.num_seconds()
        );
        HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.into()))
    }
}

/// Per-request session state: admin flag plus pending notices.
#[derive(Debug, Clone)]
pub struct Session {
    sid: Uuid,
    is_admin: bool,
    flash: Vec<String>,
    dirty: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            sid: Uuid::new_v4(),
            is_admin: false,
            flash: Vec::new(),
            dirty: false,
        }
    }

    pub fn sid(&self) -> Uuid {
        self.sid
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// True when the cookie has to be re-issued.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn grant_admin(&mut self) {
        self.is_admin = true;
        self.dirty = true;
    }

    /// Drop everything, including pending notices, and start over under a new id.
    pub fn clear(&mut self) {
        *self = Self::anonymous();
        self.dirty = true;
    }

    pub fn flash(&mut self, notice: impl Into<String>) {
        self.flash.push(notice.into());
        self.dirty = true;
    }

    pub fn notices(&self) -> &[String] {
        &self.flash
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        if !self.flash.is_empty() {
            self.dirty = true;
        }
        std::mem::take(&mut self.flash)
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.sessions.read(&parts.headers))
    }
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret", 1)
    }

    fn cookie_headers(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(raw).unwrap());
        headers
    }

    #[test]
    fn signed_session_survives_a_round_trip() {
        let keys = keys();
        let mut session = Session::anonymous();
        session.grant_admin();
        session.flash("welcome");

        let token = keys.sign(&session).unwrap();
        let headers = cookie_headers(&format!("theme=dark; {SESSION_COOKIE}={token}"));
        let restored = keys.read(&headers);

        assert!(restored.is_admin());
        assert_eq!(restored.sid(), session.sid());
        assert_eq!(restored.notices(), ["welcome".to_string()]);
        assert!(!restored.is_dirty());
    }

    #[test]
    fn tampered_or_foreign_tokens_fall_back_to_anonymous() {
        let mut session = Session::anonymous();
        session.grant_admin();
        let foreign = SessionKeys::new("other-secret", 1).sign(&session).unwrap();

        let restored = keys().read(&cookie_headers(&format!("{SESSION_COOKIE}={foreign}")));
        assert!(!restored.is_admin());

        let garbage = keys().read(&cookie_headers(&format!("{SESSION_COOKIE}=abc.def.ghi")));
        assert!(!garbage.is_admin());
    }

    #[test]
    fn clear_drops_admin_flag_and_notices() {
        let mut session = Session::anonymous();
        let old_sid = session.sid();
        session.grant_admin();
        session.flash("pending");

        session.clear();

        assert!(!session.is_admin());
        assert!(session.notices().is_empty());
        assert_ne!(session.sid(), old_sid);
        assert!(session.is_dirty());
    }

    #[test]
    fn taking_notices_empties_them() {
        let mut session = Session::anonymous();
        assert!(session.take_notices().is_empty());
        assert!(!session.is_dirty());

        session.flash("one");
        session.flash("two");
        assert_eq!(session.take_notices(), vec!["one", "two"]);
        assert!(session.notices().is_empty());
    }

    #[test]
    fn set_cookie_is_http_only() {
        let value = keys().set_cookie(&Session::anonymous()).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("mgl_session="));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=3600"));
    }
}
