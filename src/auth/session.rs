//! Server-side sessions
//!
//! A session is an entry in an in-memory map keyed by a random id. The
//! client holds an HS256-signed token naming that id; the token alone is
//! never enough, the entry must still be present and unexpired.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::domain::{DomainError, DomainResult};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// Session signing configuration
#[derive(Clone)]
pub struct SessionConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Session lifetime in hours
    pub ttl_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&SecurityConfig::default())
    }
}

impl From<&SecurityConfig> for SessionConfig {
    fn from(security: &SecurityConfig) -> Self {
        Self {
            secret: security.session_secret.clone(),
            ttl_hours: security.session_ttl_hours,
            issuer: "periciales".to_string(),
        }
    }
}

/// An established login
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Claims carried by the session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Session ID
    pub sid: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<DashMap<Uuid, Session>>,
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            config,
        }
    }

    /// Start a session for `user_id` and return it with its signed token.
    pub fn create(&self, user_id: i32) -> DomainResult<(Session, String)> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now + Duration::hours(self.config.ttl_hours),
        };

        let claims = SessionClaims {
            sub: user_id.to_string(),
            sid: session.id.to_string(),
            exp: session.expires_at.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| DomainError::Storage(format!("failed to sign session token: {}", e)))?;

        self.sessions.insert(session.id, session.clone());
        debug!(session_id = %session.id, user_id, "Session created");

        Ok((session, token))
    }

    /// Resolve a token to its live session.
    pub fn validate(&self, token: &str) -> DomainResult<Session> {
        let claims = self.decode(token)?;
        let session_id = Uuid::parse_str(&claims.sid)
            .map_err(|_| DomainError::Unauthenticated("Invalid session token".to_string()))?;

        let session = self
            .sessions
            .get(&session_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::Unauthenticated("Session not found".to_string()))?;

        if session.is_expired() {
            self.sessions.remove(&session_id);
            return Err(DomainError::Unauthenticated("Session expired".to_string()));
        }

        Ok(session)
    }

    /// End the session named by `token`. Unknown or malformed tokens are a no-op.
    pub fn revoke(&self, token: &str) -> Option<Session> {
        let claims = self.decode(token).ok()?;
        let session_id = Uuid::parse_str(&claims.sid).ok()?;
        self.remove(session_id)
    }

    pub fn remove(&self, session_id: Uuid) -> Option<Session> {
        self.sessions.remove(&session_id).map(|(_, session)| session)
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop all expired sessions, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired());
        before.saturating_sub(self.sessions.len())
    }

    fn decode(&self, token: &str) -> DomainResult<SessionClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("Rejected session token: {}", e);
            DomainError::Unauthenticated("Invalid session token".to_string())
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
