//! Development Authentication
//!
//! Resolves an inbound credential (signed bearer token or basic-auth pair)
//! to the opaque user id that scopes every repository query. Tokens are
//! HMAC-SHA256 signed as `{user_id}.{hex signature}`; this is a development
//! scheme, not a session system.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use compass::ports::UserRepository;

use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Authenticated user id, inserted into request extensions by the middleware
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Issues and verifies signed bearer tokens
pub struct AuthService {
    secret: String,
    mock_password: Option<String>,
}

impl AuthService {
    pub fn new(secret: String, mock_password: Option<String>) -> Self {
        Self {
            secret,
            mock_password,
        }
    }

    /// Issue a bearer token for a user id
    pub fn issue_token(&self, user_id: Uuid) -> String {
        format!("{}.{}", user_id, self.signature(user_id))
    }

    /// Verify a bearer token, returning the embedded user id
    pub fn verify_token(&self, token: &str) -> Option<Uuid> {
        let (id_part, sig_part) = token.split_once('.')?;
        let user_id = Uuid::parse_str(id_part).ok()?;

        let sig_bytes = hex::decode(sig_part).ok()?;
        let mut mac = self.mac();
        mac.update(user_id.to_string().as_bytes());
        mac.verify_slice(&sig_bytes).ok()?;

        Some(user_id)
    }

    /// Check a password against the development login password.
    /// Always false when no password is configured.
    pub fn check_password(&self, candidate: &str) -> bool {
        self.mock_password
            .as_deref()
            .map(|p| p == candidate)
            .unwrap_or(false)
    }

    pub fn login_enabled(&self) -> bool {
        self.mock_password.is_some()
    }

    fn signature(&self, user_id: Uuid) -> String {
        let mut mac = self.mac();
        mac.update(user_id.to_string().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC can take key of any size")
    }
}

/// Authentication middleware
///
/// Accepts `Authorization: Bearer <token>` or `Authorization: Basic
/// <base64 email:password>` and stores the resolved [`AuthUser`] in request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let user_id = if let Some(token) = header.strip_prefix("Bearer ") {
        state
            .auth
            .verify_token(token)
            .ok_or(StatusCode::UNAUTHORIZED)?
    } else if let Some(encoded) = header.strip_prefix("Basic ") {
        resolve_basic(&state, encoded)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?
    } else {
        tracing::warn!("unsupported Authorization scheme");
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}

async fn resolve_basic(state: &AppState, encoded: &str) -> Option<Uuid> {
    let decoded = BASE64.decode(encoded).ok()?;
    let pair = String::from_utf8(decoded).ok()?;
    let (email, password) = pair.split_once(':')?;

    if !state.auth.check_password(password) {
        return None;
    }

    match state.user_repo.find_by_email(email).await {
        Ok(Some(user)) => Some(user.id),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("basic-auth lookup failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("test-secret".to_string(), Some("hunter2".to_string()))
    }

    #[test]
    fn test_token_roundtrip() {
        let auth = service();
        let user_id = Uuid::new_v4();
        let token = auth.issue_token(user_id);
        assert_eq!(auth.verify_token(&token), Some(user_id));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let auth = service();
        let token = auth.issue_token(Uuid::new_v4());

        // Swap the embedded user id, keeping the signature.
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), sig);
        assert_eq!(auth.verify_token(&forged), None);

        // Different secret.
        let other = AuthService::new("other-secret".to_string(), None);
        assert_eq!(other.verify_token(&token), None);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let auth = service();
        assert_eq!(auth.verify_token("not-a-token"), None);
        assert_eq!(auth.verify_token("a.b"), None);
    }

    #[test]
    fn test_password_check() {
        let auth = service();
        assert!(auth.check_password("hunter2"));
        assert!(!auth.check_password("wrong"));

        let disabled = AuthService::new("s".to_string(), None);
        assert!(!disabled.check_password("hunter2"));
        assert!(!disabled.login_enabled());
    }
}
