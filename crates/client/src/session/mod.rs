//! Admin session gate.
//!
//! ```text
//! Unverified ──verify──▶ Verifying ──▶ Authenticated ──logout──▶ Anonymous
//!     │                      └──────▶ Anonymous ──login──▶ Authenticated
//!     └── no stored token ──────────▶ Anonymous
//! ```
//!
//! The gate owns the persisted token: it is written on login and removed on
//! logout or when verification fails. There is no refresh or expiry; an
//! authenticated session lasts until logout or until the next startup
//! verification fails.

mod demo;
mod store;

use pencil_gallery_core::{AdminIdentity, Email};
use secrecy::ExposeSecret;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, ValidationError};
use crate::remote::{AuthApi, ResetRequest};

pub use demo::{DEMO_ADMIN_ID, DEMO_LOGIN_DELAY, DEMO_TOKEN, DEMO_VERIFY_DELAY, DemoAccount};
pub use store::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore, TokenStoreError};

/// Minimum length of a new admin password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Where the gate is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Startup, before the stored token has been looked at.
    #[default]
    Unverified,
    /// A stored token is being checked.
    Verifying,
    Authenticated(AdminIdentity),
    Anonymous,
}

/// Tracks whether an admin is signed in on this device.
#[derive(Debug)]
pub struct SessionGate<A, S> {
    auth: A,
    store: S,
    demo: Option<DemoAccount>,
    state: SessionState,
}

impl<A: AuthApi, S: TokenStore> SessionGate<A, S> {
    /// A gate in [`SessionState::Unverified`].
    ///
    /// `demo` enables the demo login; pass `None` in production.
    #[must_use]
    pub const fn new(auth: A, store: S, demo: Option<DemoAccount>) -> Self {
        Self {
            auth,
            store,
            demo,
            state: SessionState::Unverified,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The signed-in admin, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&AdminIdentity> {
        match &self.state {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Unverified | SessionState::Verifying | SessionState::Anonymous => None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    fn is_demo_token(&self, token: &str) -> bool {
        self.demo.is_some() && token == DEMO_TOKEN
    }

    /// Check the stored token, once at startup.
    ///
    /// Never fails: a missing, rejected or unverifiable token leaves the
    /// gate [`SessionState::Anonymous`], and a rejected token is removed.
    #[instrument(skip(self))]
    pub async fn verify(&mut self) -> &SessionState {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No stored session");
                self.state = SessionState::Anonymous;
                return &self.state;
            }
            Err(e) => {
                warn!(error = %e, "Could not read stored session");
                self.state = SessionState::Anonymous;
                return &self.state;
            }
        };

        self.state = SessionState::Verifying;

        if let Some(demo) = self.demo.as_ref().filter(|_| self.is_demo_token(token.expose_secret())) {
            tokio::time::sleep(DEMO_VERIFY_DELAY).await;
            self.state = SessionState::Authenticated(demo.identity());
            return &self.state;
        }

        self.state = match self.auth.verify(token.expose_secret()).await {
            Ok(Some(identity)) => {
                info!(admin = %identity.email, "Session restored");
                SessionState::Authenticated(identity)
            }
            Ok(None) => {
                debug!("Stored session is no longer valid");
                self.discard_token();
                SessionState::Anonymous
            }
            Err(e) => {
                warn!(error = %e, "Session verification failed");
                self.discard_token();
                SessionState::Anonymous
            }
        };
        &self.state
    }

    fn discard_token(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Could not remove stored session");
        }
    }

    /// Sign in and persist the session token.
    ///
    /// On failure the gate stays in its current state.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email or blank password,
    /// the backend's error for rejected credentials, or a token store error
    /// if the session cannot be persisted.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AdminIdentity> {
        let email = Email::parse(email).map_err(ValidationError::from)?;
        if password.is_empty() {
            return Err(ValidationError::Required("Password").into());
        }

        if let Some(demo) = self.demo.as_ref().filter(|d| d.matches(&email, password)) {
            let identity = demo.identity();
            tokio::time::sleep(DEMO_LOGIN_DELAY).await;
            self.store.save(DEMO_TOKEN)?;
            info!("Demo admin signed in");
            self.state = SessionState::Authenticated(identity.clone());
            return Ok(identity);
        }

        let session = self.auth.login(&email, password).await?;
        if let Err(e) = self.store.save(session.token.expose_secret()) {
            // The token cannot be kept, so end the session it belongs to
            if let Err(logout) = self.auth.logout(session.token.expose_secret()).await {
                warn!(error = %logout, "Could not revoke unsaved session");
            }
            return Err(e.into());
        }
        info!(admin = %session.identity.email, "Admin signed in");
        self.state = SessionState::Authenticated(session.identity.clone());
        Ok(session.identity)
    }

    /// Sign out. Always succeeds locally; the backend call is best-effort
    /// and skipped for the demo session.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        let token = self.store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Could not read stored session");
            None
        });

        if let Some(token) = token
            && !self.is_demo_token(token.expose_secret())
            && let Err(e) = self.auth.logout(token.expose_secret()).await
        {
            warn!(error = %e, "Backend logout failed, clearing local session anyway");
        }

        self.discard_token();
        self.state = SessionState::Anonymous;
        info!("Admin signed out");
    }

    /// Create an admin account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank, the email is
    /// malformed, the passwords differ or are too short; otherwise the
    /// backend's error.
    #[instrument(skip(self, password, confirm))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<AdminIdentity> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("Name").into());
        }
        let email = Email::parse(email).map_err(ValidationError::from)?;
        if password != confirm {
            return Err(ValidationError::PasswordMismatch.into());
        }
        check_password_length(password)?;

        let identity = self.auth.register(name, &email, password).await?;
        info!(admin = %identity.email, "Admin account registered");
        Ok(identity)
    }

    /// Ask for a password reset email.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email, or the backend's
    /// error.
    #[instrument(skip(self))]
    pub async fn request_password_reset(&self, email: &str) -> Result<ResetRequest> {
        let email = Email::parse(email).map_err(ValidationError::from)?;
        self.auth.request_reset(&email).await
    }

    /// Set a new password with a reset token. The admin signs in again
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank token or short password, or
    /// the backend's error.
    #[instrument(skip_all)]
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ValidationError::Required("Reset token").into());
        }
        check_password_length(new_password)?;
        self.auth.reset_password(token, new_password).await?;
        info!("Admin password reset");
        Ok(())
    }
}

fn check_password_length(password: &str) -> std::result::Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use tokio::time::Instant;

    use super::*;
    use crate::error::GalleryError;
    use crate::fake::{FakeBackend, VALID_PASSWORD, VALID_TOKEN, admin_identity};

    fn demo() -> Option<DemoAccount> {
        Some(DemoAccount::new(
            Email::parse("admin@demo.com").unwrap(),
            "demo123",
            "Demo Admin",
        ))
    }

    fn gate(
        backend: &FakeBackend,
        store: &MemoryTokenStore,
        demo: Option<DemoAccount>,
    ) -> SessionGate<FakeBackend, MemoryTokenStore> {
        SessionGate::new(backend.clone(), store.clone(), demo)
    }

    #[tokio::test]
    async fn test_starts_unverified() {
        let gate = gate(&FakeBackend::default(), &MemoryTokenStore::new(), None);
        assert_eq!(gate.state(), &SessionState::Unverified);
        assert!(gate.identity().is_none());
    }

    #[tokio::test]
    async fn test_verify_without_token_is_anonymous_without_calls() {
        let backend = FakeBackend::default();
        let mut gate = gate(&backend, &MemoryTokenStore::new(), demo());

        assert_eq!(gate.verify().await, &SessionState::Anonymous);
        assert_eq!(backend.calls().auth, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_demo_token_bypasses_backend() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::with_token(DEMO_TOKEN);
        let mut gate = gate(&backend, &store, demo());

        let start = Instant::now();
        gate.verify().await;

        assert!(start.elapsed() >= DEMO_VERIFY_DELAY);
        let identity = gate.identity().unwrap();
        assert_eq!(identity.name, "Demo Admin");
        assert_eq!(identity.id.as_str(), DEMO_ADMIN_ID);
        assert_eq!(backend.calls().auth, 0);
        assert_eq!(store.peek().as_deref(), Some(DEMO_TOKEN));
    }

    #[tokio::test]
    async fn test_demo_token_goes_to_backend_when_demo_disabled() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::with_token(DEMO_TOKEN);
        let mut gate = gate(&backend, &store, None);

        assert_eq!(gate.verify().await, &SessionState::Anonymous);
        assert_eq!(backend.calls().auth, 1);
        assert!(store.peek().is_none());
    }

    #[tokio::test]
    async fn test_verify_valid_token() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::with_token(VALID_TOKEN);
        let mut gate = gate(&backend, &store, None);

        gate.verify().await;
        assert_eq!(gate.identity(), Some(&admin_identity()));
        assert_eq!(store.peek().as_deref(), Some(VALID_TOKEN));
    }

    #[tokio::test]
    async fn test_verify_invalid_token_removes_it() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::with_token("stale");
        let mut gate = gate(&backend, &store, demo());

        assert_eq!(gate.verify().await, &SessionState::Anonymous);
        assert_eq!(backend.calls().auth, 1);
        assert!(store.peek().is_none());
    }

    #[tokio::test]
    async fn test_verify_error_removes_token() {
        let backend = FakeBackend::default();
        backend.fail_next_auth("gateway timeout");
        let store = MemoryTokenStore::with_token(VALID_TOKEN);
        let mut gate = gate(&backend, &store, None);

        assert_eq!(gate.verify().await, &SessionState::Anonymous);
        assert!(store.peek().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_login() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::new();
        let mut gate = gate(&backend, &store, demo());

        let start = Instant::now();
        let identity = gate.login("admin@demo.com", "demo123").await.unwrap();

        assert!(start.elapsed() >= DEMO_LOGIN_DELAY);
        assert_eq!(identity.name, "Demo Admin");
        assert!(gate.is_authenticated());
        assert_eq!(store.peek().as_deref(), Some("demo-token"));
        assert_eq!(backend.calls().auth, 0);
    }

    #[tokio::test]
    async fn test_demo_credentials_rejected_when_demo_disabled() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::new();
        let mut gate = gate(&backend, &store, None);

        let err = gate.login("admin@demo.com", "demo123").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
        assert_eq!(backend.calls().auth, 1);
        assert!(store.peek().is_none());
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::new();
        let mut gate = gate(&backend, &store, None);

        let identity = gate
            .login(admin_identity().email.as_str(), VALID_PASSWORD)
            .await
            .unwrap();
        assert_eq!(identity, admin_identity());
        assert_eq!(store.peek().as_deref(), Some(VALID_TOKEN));
        assert!(gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_state() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::new();
        let mut gate = gate(&backend, &store, None);
        gate.verify().await;

        assert!(gate.login("owner@gallery.test", "wrong").await.is_err());
        assert_eq!(gate.state(), &SessionState::Anonymous);
        assert!(store.peek().is_none());
    }

    #[tokio::test]
    async fn test_login_validates_before_calling() {
        let backend = FakeBackend::default();
        let mut gate = gate(&backend, &MemoryTokenStore::new(), None);

        let err = gate.login("not-an-email", "x").await.unwrap_err();
        assert!(matches!(
            err,
            GalleryError::Validation(ValidationError::Email(_))
        ));
        let err = gate.login("owner@gallery.test", "").await.unwrap_err();
        assert!(matches!(
            err,
            GalleryError::Validation(ValidationError::Required("Password"))
        ));
        assert_eq!(backend.calls().auth, 0);
    }

    #[tokio::test]
    async fn test_logout_calls_backend_and_clears() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::with_token(VALID_TOKEN);
        let mut gate = gate(&backend, &store, None);
        gate.verify().await;
        assert!(gate.is_authenticated());

        gate.logout().await;
        assert_eq!(gate.state(), &SessionState::Anonymous);
        assert!(store.peek().is_none());
        assert_eq!(backend.calls().auth, 2);
    }

    #[tokio::test]
    async fn test_logout_ignores_backend_failure() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::with_token(VALID_TOKEN);
        let mut gate = gate(&backend, &store, None);

        backend.fail_next_auth("connection refused");
        gate.logout().await;
        assert_eq!(gate.state(), &SessionState::Anonymous);
        assert!(store.peek().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_logout_skips_backend() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::new();
        let mut gate = gate(&backend, &store, demo());
        gate.login("admin@demo.com", "demo123").await.unwrap();

        gate.logout().await;
        assert_eq!(backend.calls().auth, 0);
        assert!(store.peek().is_none());
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_validation() {
        let backend = FakeBackend::default();
        let gate = gate(&backend, &MemoryTokenStore::new(), None);

        let err = gate
            .register("Ann", "ann@gallery.test", "longenough", "different1")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");

        let err = gate
            .register("Ann", "ann@gallery.test", "short", "short")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters");

        let err = gate
            .register(" ", "ann@gallery.test", "longenough", "longenough")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GalleryError::Validation(ValidationError::Required("Name"))
        ));
        assert_eq!(backend.calls().auth, 0);
    }

    #[tokio::test]
    async fn test_register_does_not_sign_in() {
        let backend = FakeBackend::default();
        let store = MemoryTokenStore::new();
        let mut gate = gate(&backend, &store, None);
        gate.verify().await;

        let identity = gate
            .register("Ann", "ann@gallery.test", "longenough", "longenough")
            .await
            .unwrap();
        assert_eq!(identity.name, "Ann");
        assert_eq!(gate.state(), &SessionState::Anonymous);
        assert!(store.peek().is_none());
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let backend = FakeBackend::default();
        let gate = gate(&backend, &MemoryTokenStore::new(), None);

        let request = gate
            .request_password_reset("owner@gallery.test")
            .await
            .unwrap();
        let token = request.reset_token.unwrap();

        let err = gate.reset_password(&token, "short").await.unwrap_err();
        assert!(matches!(
            err,
            GalleryError::Validation(ValidationError::PasswordTooShort { min: 8 })
        ));

        gate.reset_password(&token, "brand-new-pass").await.unwrap();
        assert!(gate.reset_password("bogus", "brand-new-pass").await.is_err());
    }

    #[derive(Debug)]
    struct ReadOnlyStore;

    impl TokenStore for ReadOnlyStore {
        fn load(&self) -> std::result::Result<Option<SecretString>, TokenStoreError> {
            Ok(None)
        }

        fn save(&self, _token: &str) -> std::result::Result<(), TokenStoreError> {
            Err(TokenStoreError::Io {
                path: "session.json".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }

        fn clear(&self) -> std::result::Result<(), TokenStoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unsaved_login_is_revoked() {
        let backend = FakeBackend::default();
        let mut gate = SessionGate::new(backend.clone(), ReadOnlyStore, None);

        let err = gate
            .login(admin_identity().email.as_str(), VALID_PASSWORD)
            .await
            .unwrap_err();

        assert!(matches!(err, GalleryError::TokenStore(_)));
        // login, then logout of the session that could not be stored
        assert_eq!(backend.calls().auth, 2);
        assert!(gate.identity().is_none());
    }
}
