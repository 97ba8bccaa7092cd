//! Login, session resolution and role checks
//!
//! HTTP handlers and middleware are thin wrappers around this service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::session::{Session, SessionManager};
use crate::domain::{DomainError, DomainResult, Role, User, UserRepositoryInterface};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: Session,
    pub token: String,
    pub user: User,
}

pub struct AuthService {
    users: Arc<dyn UserRepositoryInterface>,
    sessions: SessionManager,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepositoryInterface>, sessions: SessionManager) -> Self {
        Self { users, sessions }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    // ── Authentication ──────────────────────────────────────────

    /// Exact, case-sensitive match on both username and password.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginOutcome> {
        let Some(user) = self.users.find_by_credentials(username, password).await? else {
            metrics::counter!("auth_logins_total", "outcome" => "failure").increment(1);
            warn!(username, "Login failed");
            return Err(DomainError::InvalidCredentials);
        };

        let purged = self.sessions.purge_expired();
        if purged > 0 {
            debug!(purged, "Expired sessions purged");
        }

        let (session, token) = self.sessions.create(user.id)?;
        metrics::counter!("auth_logins_total", "outcome" => "success").increment(1);
        info!(user_id = user.id, role = %user.role, "User logged in");

        Ok(LoginOutcome {
            session,
            token,
            user,
        })
    }

    /// Current user for a session token.
    ///
    /// A session whose user no longer exists is ended.
    pub async fn resolve(&self, token: &str) -> DomainResult<User> {
        let session = self.sessions.validate(token)?;

        match self.users.get_user_by_id(session.user_id).await? {
            Some(user) => Ok(user),
            None => {
                self.sessions.remove(session.id);
                warn!(user_id = session.user_id, "Session user no longer exists");
                Err(DomainError::Unauthenticated("User not found".to_string()))
            }
        }
    }

    pub fn logout(&self, token: &str) {
        if let Some(session) = self.sessions.revoke(token) {
            info!(user_id = session.user_id, "User logged out");
        }
    }
}

/// Fails with `Forbidden` unless the user's role is in `allowed`.
pub fn require_role(user: &User, allowed: &[Role]) -> DomainResult<()> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!(
            "role '{}' is not allowed to perform this action",
            user.role
        )))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::SessionConfig;
    use crate::domain::CreateUserDto;
    use crate::infrastructure::database::test_support::{test_db, TestDb};
    use crate::infrastructure::database::SeaOrmUserRepository;

    async fn setup() -> (TestDb, AuthService) {
        let db = test_db().await;
        let repo = Arc::new(SeaOrmUserRepository::new(db.connection()));
        for (username, password, role) in [
            ("ana", "pw1", Role::Perito),
            ("sam", "pw2", Role::Supervisor),
            ("root", "pw3", Role::Administrator),
        ] {
            repo.create_user(CreateUserDto {
                name: username.to_uppercase(),
                username: username.to_string(),
                password: password.to_string(),
                role,
            })
            .await
            .unwrap();
        }

        let service = AuthService::new(repo, SessionManager::new(SessionConfig::default()));
        (db, service)
    }

    #[tokio::test]
    async fn login_with_valid_credentials_establishes_session() {
        let (_db, auth) = setup().await;

        let outcome = auth.login("ana", "pw1").await.unwrap();
        assert_eq!(outcome.user.username, "ana");
        assert_eq!(outcome.user.role, Role::Perito);
        assert_eq!(outcome.session.user_id, outcome.user.id);

        let current = auth.resolve(&outcome.token).await.unwrap();
        assert_eq!(current, outcome.user);
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let (_db, auth) = setup().await;

        let err = auth.login("ana", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
        assert_eq!(auth.sessions().active_count(), 0);
    }

    #[tokio::test]
    async fn login_is_case_sensitive() {
        let (_db, auth) = setup().await;

        assert!(auth.login("ANA", "pw1").await.is_err());
        assert!(auth.login("ana", "PW1").await.is_err());
    }

    #[tokio::test]
    async fn logout_ends_session() {
        let (_db, auth) = setup().await;
        let outcome = auth.login("sam", "pw2").await.unwrap();

        auth.logout(&outcome.token);

        assert!(matches!(
            auth.resolve(&outcome.token).await,
            Err(DomainError::Unauthenticated(_))
        ));
        // second logout is harmless
        auth.logout(&outcome.token);
    }

    #[tokio::test]
    async fn each_login_gets_its_own_session() {
        let (_db, auth) = setup().await;
        let first = auth.login("root", "pw3").await.unwrap();
        let second = auth.login("root", "pw3").await.unwrap();
        assert_ne!(first.session.id, second.session.id);

        auth.logout(&first.token);
        assert!(auth.resolve(&second.token).await.is_ok());
    }

    #[test]
    fn require_role_gates_report_authors() {
        let mut user = User {
            id: 1,
            name: "S".to_string(),
            username: "s".to_string(),
            password: "p".to_string(),
            role: Role::Supervisor,
        };
        assert!(matches!(
            require_role(&user, &Role::REPORT_AUTHORS),
            Err(DomainError::Forbidden(_))
        ));

        user.role = Role::Perito;
        assert!(require_role(&user, &Role::REPORT_AUTHORS).is_ok());
        user.role = Role::Administrator;
        assert!(require_role(&user, &Role::REPORT_AUTHORS).is_ok());
    }
}
