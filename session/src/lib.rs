//! Session management — OTP sign-in, signup, and account lifecycle.
//!
//! Everything here is demo-grade on purpose: the OTP is the literal
//! [`MOCK_OTP`], "sending" it is a log line behind a delay, and the user
//! record lives in whatever [`UserStore`] was injected. The manager never
//! reaches for ambient state; callers construct it with the store and clock
//! they want.

pub mod error;

pub use error::SessionError;

use divs_store::{Theme, UserStore};
use divs_types::{Clock, SimulationParams, User, Validators};
use std::sync::Arc;
use std::time::Duration;

/// The one and only OTP the demo accepts.
pub const MOCK_OTP: &str = "123456";

/// Manages the signed-in user and the registered-user list.
pub struct SessionManager {
    store: Arc<dyn UserStore>,
    clock: Arc<dyn Clock>,
    params: SimulationParams,
}

impl SessionManager {
    pub fn new(store: Arc<dyn UserStore>, clock: Arc<dyn Clock>, params: SimulationParams) -> Self {
        Self {
            store,
            clock,
            params,
        }
    }

    /// Pretend to send an OTP over SMS. Format check, fixed delay, done.
    pub async fn send_otp(&self, phone: &str) -> Result<(), SessionError> {
        Validators::phone(phone)?;
        tokio::time::sleep(Duration::from_millis(self.params.send_otp_delay_ms)).await;
        tracing::info!(phone, "mock OTP sent: {MOCK_OTP}");
        Ok(())
    }

    /// Check an OTP against the mock value. Deterministic: format errors
    /// and wrong codes fail, `"123456"` passes.
    pub fn verify_otp(&self, phone: &str, otp: &str) -> Result<(), SessionError> {
        Validators::phone(phone)?;
        Validators::otp(otp)?;
        if otp == MOCK_OTP {
            Ok(())
        } else {
            Err(SessionError::WrongOtp)
        }
    }

    /// Sign in a previously registered phone. The lookup is a linear scan;
    /// the first matching record wins.
    pub fn login(&self, phone: &str, otp: &str) -> Result<User, SessionError> {
        self.verify_otp(phone, otp)?;

        let user = self
            .store
            .find_by_phone(phone)?
            .ok_or(SessionError::UserNotFound)?;

        self.store.set_current_user(&user)?;
        self.store.set_authenticated(true)?;
        tracing::info!(user = %user.id, "login succeeded");
        Ok(user)
    }

    /// Register a new user and sign them in. Duplicate phones are appended,
    /// not rejected, matching the original demo's behavior.
    pub fn signup(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        otp: &str,
    ) -> Result<User, SessionError> {
        Validators::name(name)?;
        Validators::email(email)?;
        self.verify_otp(phone, otp)?;

        let user = User {
            id: self.clock.now().as_millis().to_string(),
            name: name.trim().to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            avatar: None,
        };

        self.store.append_registered(&user)?;
        self.store.set_current_user(&user)?;
        self.store.set_authenticated(true)?;
        tracing::info!(user = %user.id, "signup succeeded");
        Ok(user)
    }

    /// Clear the session. The registered list is untouched.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.set_authenticated(false)?;
        self.store.clear_current_user()?;
        Ok(())
    }

    /// Remove the signed-in user's record and end the session.
    pub fn delete_account(&self) -> Result<(), SessionError> {
        let user = self
            .store
            .current_user()?
            .ok_or(SessionError::NotSignedIn)?;
        self.store.remove_registered(&user.id)?;
        self.store.clear_current_user()?;
        self.store.set_authenticated(false)?;
        tracing::info!(user = %user.id, "account deleted");
        Ok(())
    }

    /// Rewrite the current user's profile, both the session record and the
    /// registered-list entry (matched by phone).
    pub fn update_user(&self, user: &User) -> Result<(), SessionError> {
        self.store.set_current_user(user)?;
        self.store.update_registered(user)?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, SessionError> {
        Ok(self.store.current_user()?)
    }

    pub fn is_authenticated(&self) -> Result<bool, SessionError> {
        Ok(self.store.is_authenticated()?)
    }

    pub fn theme(&self) -> Result<Theme, SessionError> {
        Ok(self.store.theme()?)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), SessionError> {
        Ok(self.store.set_theme(theme)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use divs_nullables::{NullClock, NullStore};

    fn manager() -> (SessionManager, Arc<NullStore>, Arc<NullClock>) {
        let store = Arc::new(NullStore::new());
        let clock = Arc::new(NullClock::new(1_000_000));
        let mgr = SessionManager::new(
            store.clone(),
            clock.clone(),
            SimulationParams::instant(),
        );
        (mgr, store, clock)
    }

    const PHONE: &str = "4155550100";

    #[test]
    fn signup_then_login_round_trip() {
        let (mgr, _, clock) = manager();
        let user = mgr
            .signup("Jane Smith", "jane@example.com", PHONE, MOCK_OTP)
            .unwrap();
        assert_eq!(user.id, "1000000");
        assert!(mgr.is_authenticated().unwrap());

        mgr.logout().unwrap();
        assert!(!mgr.is_authenticated().unwrap());
        assert!(mgr.current_user().unwrap().is_none());

        clock.advance(5);
        let back = mgr.login(PHONE, MOCK_OTP).unwrap();
        assert_eq!(back.id, user.id);
        assert!(mgr.is_authenticated().unwrap());
    }

    #[test]
    fn login_unregistered_phone_fails_even_with_right_otp() {
        let (mgr, _, _) = manager();
        assert!(matches!(
            mgr.login(PHONE, MOCK_OTP),
            Err(SessionError::UserNotFound)
        ));
    }

    #[test]
    fn login_wrong_otp_fails_for_registered_phone() {
        let (mgr, _, _) = manager();
        mgr.signup("Jane Smith", "jane@example.com", PHONE, MOCK_OTP)
            .unwrap();
        assert!(matches!(
            mgr.login(PHONE, "654321"),
            Err(SessionError::WrongOtp)
        ));
    }

    #[test]
    fn signup_rejects_wrong_otp_regardless_of_fields() {
        let (mgr, _, _) = manager();
        assert!(matches!(
            mgr.signup("Jane Smith", "jane@example.com", PHONE, "000000"),
            Err(SessionError::WrongOtp)
        ));
    }

    #[test]
    fn signup_rejects_invalid_fields_before_otp_check() {
        let (mgr, _, _) = manager();
        assert!(mgr.signup("J", "jane@example.com", PHONE, MOCK_OTP).is_err());
        assert!(mgr.signup("Jane", "not-an-email", PHONE, MOCK_OTP).is_err());
        assert!(mgr.signup("Jane", "jane@example.com", "123", MOCK_OTP).is_err());
    }

    #[test]
    fn delete_account_removes_registration() {
        let (mgr, store, _) = manager();
        mgr.signup("Jane Smith", "jane@example.com", PHONE, MOCK_OTP)
            .unwrap();
        mgr.delete_account().unwrap();

        assert!(store.registered_users().unwrap().is_empty());
        assert!(!mgr.is_authenticated().unwrap());
        assert!(matches!(
            mgr.login(PHONE, MOCK_OTP),
            Err(SessionError::UserNotFound)
        ));
    }

    #[test]
    fn delete_account_without_session_errors() {
        let (mgr, _, _) = manager();
        assert!(matches!(
            mgr.delete_account(),
            Err(SessionError::NotSignedIn)
        ));
    }

    #[test]
    fn update_user_rewrites_registered_entry() {
        let (mgr, store, _) = manager();
        let mut user = mgr
            .signup("Jane Smith", "jane@example.com", PHONE, MOCK_OTP)
            .unwrap();
        user.name = "Jane Q. Smith".into();
        mgr.update_user(&user).unwrap();

        assert_eq!(store.registered_users().unwrap()[0].name, "Jane Q. Smith");
        assert_eq!(mgr.current_user().unwrap().unwrap().name, "Jane Q. Smith");
    }

    #[tokio::test]
    async fn send_otp_validates_phone_only() {
        let (mgr, _, _) = manager();
        assert!(mgr.send_otp(PHONE).await.is_ok());
        assert!(mgr.send_otp("abc").await.is_err());
    }

    #[test]
    fn theme_preference_persists_in_store() {
        let (mgr, _, _) = manager();
        assert_eq!(mgr.theme().unwrap(), Theme::Light);
        mgr.set_theme(Theme::Dark).unwrap();
        assert_eq!(mgr.theme().unwrap(), Theme::Dark);
    }
}
