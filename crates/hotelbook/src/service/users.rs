//! User accounts and the demo login.
//!
//! Passwords are accepted but never checked. The configured demo accounts
//! always log in; every other registered account succeeds at random with
//! `auth.random_success_rate`.

use rand::Rng;
use tracing::{debug, error, info};

use super::{respond, HotelService};
use crate::catalog::name_order;
use crate::error::ServiceError;
use crate::model::{Credentials, User, UserRole, UserUpdate};
use crate::response::ApiResponse;
use crate::storage::CURRENT_USER_KEY;
use crate::validation::is_valid_email;

impl HotelService {
    /// List users sorted by name, optionally only those with `role`.
    pub async fn get_users(&self, role: Option<UserRole>) -> ApiResponse<Vec<User>> {
        self.simulate_latency().await;

        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect();
        users.sort_by(|a, b| name_order(&a.name, &b.name));
        ApiResponse::ok(users)
    }

    /// Look up a single user.
    pub async fn get_user_by_id(&self, id: &str) -> ApiResponse<User> {
        self.simulate_latency().await;
        let result = self.find_user(id).cloned();
        respond("get_user_by_id", result, "User found")
    }

    /// Sign up a new guest account.
    pub async fn register_user(&mut self, email: &str, name: &str) -> ApiResponse<User> {
        self.simulate_latency().await;
        let result = self.try_register_user(email, name);
        respond("register_user", result, "Account created successfully")
    }

    fn try_register_user(&mut self, email: &str, name: &str) -> Result<User, ServiceError> {
        let email = email.trim().to_lowercase();
        self.check_email_free(&email, None)?;

        let now = Self::now();
        let user = User {
            id: self.next_id(),
            email,
            name: name.trim().to_string(),
            role: UserRole::Guest,
            bookings: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.users.push(user.clone());
        self.persist_users();

        info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user)
    }

    /// Edit a user's name, email or role.
    pub async fn update_user(&mut self, id: &str, update: UserUpdate) -> ApiResponse<User> {
        self.simulate_latency().await;
        let result = self.try_update_user(id, update);
        respond("update_user", result, "User updated successfully")
    }

    fn try_update_user(&mut self, id: &str, mut update: UserUpdate) -> Result<User, ServiceError> {
        self.find_user(id)?;
        if let Some(email) = update.email.as_mut() {
            *email = email.trim().to_lowercase();
            self.check_email_free(email, Some(id))?;
        }

        let now = Self::now();
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ServiceError::UserNotFound { id: id.to_string() })?;
        user.apply(update, now);
        let user = user.clone();
        self.persist_users();

        info!(user_id = id, role = %user.role, "User updated");
        Ok(user)
    }

    /// Remove a user. Their bookings are kept.
    pub async fn delete_user(&mut self, id: &str) -> ApiResponse<()> {
        self.simulate_latency().await;

        let Some(index) = self.users.iter().position(|u| u.id == id) else {
            return ServiceError::UserNotFound { id: id.to_string() }.into();
        };
        self.users.remove(index);
        self.persist_users();

        if self.current_user_id().as_deref() == Some(id) {
            self.clear_session();
        }
        info!(user_id = id, "User deleted");
        ApiResponse::done("User deleted successfully")
    }

    /// Log in with an email and any password.
    pub async fn authenticate(&mut self, credentials: Credentials) -> ApiResponse<User> {
        self.simulate_latency().await;
        let result = self.try_authenticate(&credentials);
        respond("authenticate", result, "Authentication successful")
    }

    fn try_authenticate(&mut self, credentials: &Credentials) -> Result<User, ServiceError> {
        let email = credentials.email.trim();
        let user = self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or(ServiceError::InvalidCredentials)?;

        if !self.config.is_demo_account(email) {
            let rate = match self.config.auth.random_success_rate {
                r if r.is_nan() => 0.0,
                r => r.clamp(0.0, 1.0),
            };
            let accepted = self.rng.gen_bool(rate);
            debug!(email, rate, accepted, "Login coin flip");
            if !accepted {
                return Err(ServiceError::InvalidCredentials);
            }
        }

        self.persist(CURRENT_USER_KEY, &user.id);
        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// End the current session.
    pub fn logout(&mut self) -> ApiResponse<()> {
        self.clear_session();
        info!("User logged out");
        ApiResponse::done("Logged out successfully")
    }

    /// The logged-in user, if any.
    ///
    /// A session naming a user that no longer exists reads as logged out.
    #[must_use]
    pub fn get_current_user(&self) -> ApiResponse<Option<User>> {
        let user = self
            .current_user_id()
            .and_then(|id| self.users.iter().find(|u| u.id == id).cloned());
        ApiResponse::ok(user)
    }

    fn current_user_id(&self) -> Option<String> {
        match self.storage.load::<String>(CURRENT_USER_KEY) {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Failed to read session");
                None
            }
        }
    }

    fn clear_session(&self) {
        if let Err(e) = self.storage.remove(CURRENT_USER_KEY) {
            error!(error = %e, "Failed to clear session");
        }
    }

    fn find_user(&self, id: &str) -> Result<&User, ServiceError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| ServiceError::UserNotFound { id: id.to_string() })
    }

    /// Reject malformed emails and emails owned by anyone but `owner`.
    fn check_email_free(&self, email: &str, owner: Option<&str>) -> Result<(), ServiceError> {
        if !is_valid_email(email) {
            return Err(ServiceError::InvalidEmail {
                email: email.to_string(),
            });
        }
        let taken = self
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email) && Some(u.id.as_str()) != owner);
        if taken {
            return Err(ServiceError::EmailTaken {
                email: email.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::model::{Credentials, UserRole, UserUpdate};
    use crate::service::test_support::{service_with, small_hotel, small_service};

    fn login(email: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: "whatever".to_string(),
        }
    }

    fn with_rate(rate: f64) -> crate::service::HotelService {
        let mut config = Config::for_tests();
        config.auth.random_success_rate = rate;
        service_with(config, small_hotel())
    }

    #[tokio::test]
    async fn test_get_users_sorted_and_filtered() {
        let service = small_service();
        let names: Vec<String> = service
            .get_users(None)
            .await
            .data
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, ["Emma Brown", "Guest User", "Hotel Administrator"]);

        let admins = service.get_users(Some(UserRole::Admin)).await.data.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].id, "u-admin");
    }

    #[tokio::test]
    async fn test_get_user_by_id() {
        let service = small_service();
        assert!(service.get_user_by_id("u-guest").await.success);
        let missing = service.get_user_by_id("nope").await;
        assert_eq!(missing.error.as_deref(), Some("User not found"));
    }

    #[tokio::test]
    async fn test_register_user() {
        let mut service = small_service();
        let user = service
            .register_user(" New.Guest@Example.com ", "New Guest")
            .await
            .data
            .unwrap();
        assert_eq!(user.email, "new.guest@example.com");
        assert_eq!(user.role, UserRole::Guest);
        assert!(user.bookings.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut service = small_service();
        let resp = service.register_user("GUEST@example.com", "Copy").await;
        assert_eq!(resp.error.as_deref(), Some("Email already registered"));
        assert_eq!(service.users.len(), 3);
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let mut service = small_service();
        let resp = service.register_user("not-an-email", "Nobody").await;
        assert_eq!(resp.error.as_deref(), Some("Invalid email"));
    }

    #[tokio::test]
    async fn test_update_user_role_and_email() {
        let mut service = small_service();
        let user = service
            .update_user(
                "u-other",
                UserUpdate {
                    role: Some(UserRole::Admin),
                    email: Some("emma.brown@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .data
            .unwrap();
        assert!(user.is_admin());

        let clash = service
            .update_user(
                "u-other",
                UserUpdate {
                    email: Some("admin@hotel.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert_eq!(clash.error.as_deref(), Some("Email already registered"));
    }

    #[tokio::test]
    async fn test_delete_user_keeps_bookings_and_ends_session() {
        let mut service = small_service();
        assert!(service.authenticate(login("guest@example.com")).await.success);

        let resp = service.delete_user("u-guest").await;
        assert!(resp.success);
        assert!(service.bookings.iter().any(|b| b.user_id == "u-guest"));
        assert!(service.get_current_user().data.unwrap().is_none());

        let again = service.delete_user("u-guest").await;
        assert_eq!(again.error.as_deref(), Some("User not found"));
    }

    #[tokio::test]
    async fn test_demo_accounts_always_log_in() {
        let mut service = with_rate(0.0);
        for _ in 0..20 {
            assert!(service.authenticate(login("admin@hotel.com")).await.success);
            assert!(service.authenticate(login("Guest@Example.com")).await.success);
        }
    }

    #[tokio::test]
    async fn test_unknown_email_fails() {
        let mut service = with_rate(1.0);
        let resp = service.authenticate(login("nobody@example.com")).await;
        assert_eq!(resp.error.as_deref(), Some("Invalid credentials"));
        assert!(service.get_current_user().data.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_success_rate_bounds() {
        let mut never = with_rate(0.0);
        let mut always = with_rate(1.0);
        for _ in 0..20 {
            assert!(
                !never
                    .authenticate(login("emma.brown@example.com"))
                    .await
                    .success
            );
            assert!(
                always
                    .authenticate(login("emma.brown@example.com"))
                    .await
                    .success
            );
        }
    }

    #[tokio::test]
    async fn test_nan_success_rate_refuses_non_demo_accounts() {
        let mut service = with_rate(f64::NAN);
        let resp = service.authenticate(login("emma.brown@example.com")).await;
        assert_eq!(resp.error.as_deref(), Some("Invalid credentials"));
        assert!(service.authenticate(login("admin@hotel.com")).await.success);
    }

    #[tokio::test]
    async fn test_authenticate_message() {
        let mut service = small_service();
        let resp = service.authenticate(login("guest@example.com")).await;
        assert_eq!(resp.message.as_deref(), Some("Authentication successful"));
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let mut service = small_service();
        assert!(service.get_current_user().data.unwrap().is_none());

        service.authenticate(login("admin@hotel.com")).await;
        let current = service.get_current_user().data.unwrap().unwrap();
        assert_eq!(current.id, "u-admin");

        assert!(service.logout().success);
        assert!(service.get_current_user().data.unwrap().is_none());
    }
}
