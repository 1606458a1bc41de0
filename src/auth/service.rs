//! # Auth Service
//!
//! Registration, login, logout and role checks on top of a user
//! repository and a session store.

use tracing::{debug, info, warn};

use super::errors::{AuthError, AuthResult};
use super::session::{Session, SessionConfig, SessionManager, SessionStore, SessionUser};
use super::user::{Role, User, UserRepository};

/// Auth service combining user storage and sessions
pub struct AuthService<U: UserRepository, S: SessionStore> {
    users: U,
    sessions: SessionManager<S>,
}

impl<U: UserRepository, S: SessionStore> AuthService<U, S> {
    pub fn new(users: U, session_store: S, session_config: SessionConfig) -> Self {
        Self {
            users,
            sessions: SessionManager::new(session_config, session_store),
        }
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    /// Create the bootstrap admin account unless that username exists.
    ///
    /// Returns whether an account was created.
    pub fn ensure_default_admin(&self, username: &str, password: &str) -> AuthResult<bool> {
        if self.users.find_by_username(username)?.is_some() {
            return Ok(false);
        }
        self.users.create(&User::new(username, password, Role::Admin)?)?;
        info!(username, "default admin created");
        Ok(true)
    }

    /// Register a new user with the `registered` role
    pub fn register(&self, username: &str, password: &str) -> AuthResult<User> {
        if username.is_empty() {
            return Err(AuthError::MissingField("Username"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("Password"));
        }
        if self.users.find_by_username(username)?.is_some() {
            return Err(AuthError::DuplicateUsername);
        }

        let user = User::new(username, password, Role::Registered)?;
        self.users.create(&user)?;
        info!(username, "user registered");
        Ok(user)
    }

    /// Check credentials and open a session; returns the raw session token
    pub fn login(&self, username: &str, password: &str) -> AuthResult<(Session, String)> {
        let user = self
            .users
            .find_by_username(username)?
            .filter(|u| u.verify_password(password));

        let Some(user) = user else {
            warn!(username, "login failed");
            return Err(AuthError::InvalidCredentials);
        };

        let purged = self.sessions.purge_expired()?;
        if purged > 0 {
            debug!(purged, "expired sessions purged");
        }

        let (session, token) = self.sessions.create_session(&user)?;
        info!(username, role = %user.role, "login");
        Ok((session, token))
    }

    /// End the session behind `token`, if any
    pub fn logout(&self, token: &str) -> AuthResult<()> {
        if self.sessions.destroy(token)? {
            info!("logout");
        }
        Ok(())
    }

    /// The user behind a session token, if the session is live
    pub fn current_user(&self, token: &str) -> AuthResult<Option<SessionUser>> {
        Ok(self.sessions.resolve(token)?.map(|s| s.user()))
    }
}

/// Gate a page on the caller's role
pub fn require_role<'a>(
    user: Option<&'a SessionUser>,
    allowed: &[Role],
    denied_message: &str,
) -> AuthResult<&'a SessionUser> {
    let user = user.ok_or(AuthError::AuthenticationRequired)?;
    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        Err(AuthError::AccessDenied(denied_message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::InMemorySessionStore;
    use crate::auth::user::InMemoryUserRepository;

    fn service() -> AuthService<InMemoryUserRepository, InMemorySessionStore> {
        AuthService::new(
            InMemoryUserRepository::new(),
            InMemorySessionStore::new(),
            SessionConfig::default(),
        )
    }

    #[test]
    fn test_register_then_login() {
        let service = service();
        let user = service.register("jane", "pw").unwrap();
        assert_eq!(user.role, Role::Registered);

        let (session, token) = service.login("jane", "pw").unwrap();
        assert_eq!(session.username, "jane");
        let current = service.current_user(&token).unwrap().unwrap();
        assert_eq!(current.role, Role::Registered);
    }

    #[test]
    fn test_register_duplicate_leaves_users_unchanged() {
        let service = service();
        service.register("jane", "pw").unwrap();
        let before = service.users().list().unwrap();

        let result = service.register("jane", "other");
        assert!(matches!(result, Err(AuthError::DuplicateUsername)));
        assert_eq!(service.users().list().unwrap(), before);
    }

    #[test]
    fn test_register_requires_fields() {
        let service = service();
        assert!(matches!(
            service.register("", "pw"),
            Err(AuthError::MissingField("Username"))
        ));
        assert!(matches!(
            service.register("jane", ""),
            Err(AuthError::MissingField("Password"))
        ));
        assert!(service.users().list().unwrap().is_empty());
    }

    #[test]
    fn test_login_wrong_password_creates_no_session() {
        let service = service();
        service.register("jane", "pw").unwrap();

        let result = service.login("jane", "wrong");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(service.sessions().store().is_empty());
    }

    #[test]
    fn test_login_unknown_user() {
        let service = service();
        assert!(matches!(
            service.login("ghost", "pw"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_logout_ends_session() {
        let service = service();
        service.register("jane", "pw").unwrap();
        let (_, token) = service.login("jane", "pw").unwrap();
        service.logout(&token).unwrap();
        assert!(service.current_user(&token).unwrap().is_none());
        service.logout(&token).unwrap();
    }

    #[test]
    fn test_ensure_default_admin_is_idempotent() {
        let service = service();
        assert!(service.ensure_default_admin("admin", "admin").unwrap());
        assert!(!service.ensure_default_admin("admin", "changed").unwrap());

        let (session, _) = service.login("admin", "admin").unwrap();
        assert_eq!(session.role, Role::Admin);
    }

    #[test]
    fn test_require_role() {
        let admin = SessionUser {
            username: "a".into(),
            role: Role::Admin,
        };
        let member = SessionUser {
            username: "m".into(),
            role: Role::Registered,
        };

        assert!(matches!(
            require_role(None, &[Role::Admin], "Admins only."),
            Err(AuthError::AuthenticationRequired)
        ));
        assert!(require_role(Some(&admin), &[Role::Admin], "Admins only.").is_ok());
        assert!(matches!(
            require_role(Some(&member), &[Role::Admin], "Admins only."),
            Err(AuthError::AccessDenied(_))
        ));
        assert!(require_role(Some(&member), &[Role::Admin, Role::Registered], "").is_ok());
    }
}
