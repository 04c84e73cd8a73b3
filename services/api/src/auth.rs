//! Auth service: registration and login orchestration
//!
//! Registration and login are each stateless, fully contained within one
//! request. The service coordinates the credential store, the password
//! hasher, and the token issuer; hashing runs on the blocking thread pool
//! so the CPU-slow work never stalls unrelated requests.

use tokio::task;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::jwt::JwtService;
use crate::models::{NewUser, User};
use crate::password::{PasswordError, PasswordHasher};
use crate::repositories::UserStore;

/// Successful login payload: the issued token plus the refreshed user row.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Orchestrates registration and login over the credential store.
#[derive(Clone)]
pub struct AuthService<S> {
    store: S,
    hasher: PasswordHasher,
    jwt: JwtService,
}

impl<S: UserStore> AuthService<S> {
    /// Create a new auth service
    pub fn new(store: S, hasher: PasswordHasher, jwt: JwtService) -> Self {
        Self { store, hasher, jwt }
    }

    /// Register a new account with the default role.
    ///
    /// No token is issued on registration; the caller logs in separately.
    ///
    /// # Errors
    /// * `DuplicateUser` - the email (or username) is already registered
    /// * `Store` - the credential store failed
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if self.store.find_by_email(email).await?.is_some() {
            info!("Registration rejected: email already registered");
            return Err(AuthError::DuplicateUser);
        }

        let hasher = self.hasher;
        let password = password.to_string();
        let password_hash = task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|_| PasswordError::TaskFailed)??;

        let new_user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        };

        // a concurrent registration can slip past the pre-check; the
        // store's unique index reports it as Duplicate, which maps back
        // to DuplicateUser below
        let user = self.store.create(&new_user).await?;

        info!("User registered: {}", user.username);
        Ok(user)
    }

    /// Log a user in by email or username.
    ///
    /// On success the last-login timestamp is persisted and a fresh token
    /// issued. Unknown identifier and wrong password both surface as
    /// `InvalidCredentials`; the distinction is logged internally only.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let Some(mut user) = self.store.find_by_identifier(identifier).await? else {
            info!("Login failed: no user matches identifier {}", identifier);
            return Err(AuthError::InvalidCredentials);
        };

        let hasher = self.hasher;
        let candidate = password.to_string();
        let stored = user.password_hash.clone();
        let matches = task::spawn_blocking(move || hasher.verify(&candidate, &stored))
            .await
            .map_err(|_| PasswordError::TaskFailed)?;

        if !matches {
            if !self.hasher.looks_hashed(&user.password_hash) {
                warn!(
                    "Stored credential for {} is not a valid hash; account needs re-registration",
                    user.username
                );
            }
            info!("Login failed: password mismatch for {}", user.username);
            return Err(AuthError::InvalidCredentials);
        }

        let last_login = self.store.record_login(user.id).await?;
        user.last_login = Some(last_login);

        let token = self
            .jwt
            .issue(user.id, user.role)
            .map_err(AuthError::Token)?;

        info!("User logged in: {}", user.username);
        Ok(LoginOutcome { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtConfig;
    use crate::models::Role;
    use crate::repositories::StoreError;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;
    use uuid::Uuid;

    const TEST_SECRET: &str = "test-secret-key";

    /// In-memory credential store double.
    #[derive(Default)]
    struct InMemoryStore {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserStore for InMemoryStore {
        async fn create(&self, new_user: &NewUser) -> Result<User, StoreError> {
            let mut users = self.users.lock().unwrap();
            if users
                .iter()
                .any(|u| u.email == new_user.email || u.username == new_user.username)
            {
                return Err(StoreError::Duplicate);
            }

            let now = Utc::now();
            let user = User {
                id: Uuid::new_v4(),
                username: new_user.username.clone(),
                email: new_user.email.clone(),
                password_hash: new_user.password_hash.clone(),
                role: Role::Standard,
                last_login: None,
                created_at: now,
                updated_at: now,
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == identifier || u.username == identifier)
                .cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn record_login(&self, user_id: Uuid) -> Result<DateTime<Utc>, StoreError> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or(StoreError::Unavailable(sqlx::Error::RowNotFound))?;
            let now = Utc::now();
            user.last_login = Some(now);
            Ok(now)
        }

        async fn delete_all(&self) -> Result<u64, StoreError> {
            let mut users = self.users.lock().unwrap();
            let count = users.len() as u64;
            users.clear();
            Ok(count)
        }

        async fn list_all(&self) -> Result<Vec<User>, StoreError> {
            Ok(self.users.lock().unwrap().clone())
        }
    }

    fn test_auth_service() -> AuthService<InMemoryStore> {
        let jwt = JwtService::new(&JwtConfig {
            secret: TEST_SECRET.to_string(),
        });
        AuthService::new(InMemoryStore::default(), PasswordHasher::new(), jwt)
    }

    #[tokio::test]
    async fn test_register_then_login_by_email() {
        let service = test_auth_service();

        let user = service
            .register("alice", "a@x.com", "pw12345")
            .await
            .expect("registration failed");
        assert_eq!(user.role, Role::Standard);
        assert!(user.last_login.is_none());
        // the stored credential is a hash, never the secret
        assert_ne!(user.password_hash, "pw12345");

        let outcome = service
            .login("a@x.com", "pw12345")
            .await
            .expect("login failed");
        assert_eq!(outcome.user.id, user.id);
        assert!(outcome.user.last_login.is_some());

        let decoder = JwtService::new(&JwtConfig {
            secret: TEST_SECRET.to_string(),
        });
        let claims = decoder.decode(&outcome.token).expect("token should decode");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Standard);
    }

    #[tokio::test]
    async fn test_login_by_username() {
        let service = test_auth_service();
        service.register("alice", "a@x.com", "pw12345").await.unwrap();

        let outcome = service
            .login("alice", "pw12345")
            .await
            .expect("login by username failed");
        assert_eq!(outcome.user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let service = test_auth_service();
        service.register("alice", "a@x.com", "pw12345").await.unwrap();

        // different username, same email
        let result = service.register("bob", "a@x.com", "other-pass").await;
        assert!(matches!(result, Err(AuthError::DuplicateUser)));
    }

    #[tokio::test]
    async fn test_duplicate_from_store_race_maps_to_duplicate_user() {
        let service = test_auth_service();
        service.register("alice", "a@x.com", "pw12345").await.unwrap();

        // same username, different email: passes the email pre-check and
        // is rejected by the store's unique index
        let result = service.register("alice", "b@x.com", "pw12345").await;
        assert!(matches!(result, Err(AuthError::DuplicateUser)));
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let service = test_auth_service();
        service.register("alice", "a@x.com", "pw12345").await.unwrap();

        let by_email = service.login("a@x.com", "wrong").await;
        assert!(matches!(by_email, Err(AuthError::InvalidCredentials)));

        let by_username = service.login("alice", "wrong").await;
        assert!(matches!(by_username, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_identifier_is_invalid_credentials() {
        let service = test_auth_service();

        let result = service.login("nobody@x.com", "pw12345").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_legacy_plaintext_credential_never_authenticates() {
        let service = test_auth_service();

        // simulate a legacy row where the stored value is the raw secret
        service
            .store
            .create(&NewUser {
                username: "legacy".to_string(),
                email: "legacy@x.com".to_string(),
                password_hash: "hunter2".to_string(),
            })
            .await
            .unwrap();

        let result = service.login("legacy", "hunter2").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
