//! services/portal/src/adapters/mock_otp.rs
//!
//! An in-memory implementation of the `OtpService` port. It stands in for the SMS
//! gateway and the account backend: codes are generated locally and logged, and an
//! account is created with the starter points the first time a phone verifies.

use async_trait::async_trait;
use bachelor_point_core::domain::{points, SessionToken, SignupProfile, User};
use bachelor_point_core::ports::{OtpService, PortError, PortResult};
use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

const SESSION_DAYS: i64 = 30;

#[derive(Default)]
struct Registry {
    /// Outstanding code per canonical phone number.
    codes: HashMap<String, String>,
    users: HashMap<String, User>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `OtpService` port without any network.
pub struct InMemoryOtpService {
    latency: Duration,
    accept_any: bool,
    registry: Mutex<Registry>,
}

impl InMemoryOtpService {
    /// Creates a new `InMemoryOtpService`.
    pub fn new(latency: Duration, accept_any: bool) -> Self {
        Self {
            latency,
            accept_any,
            registry: Mutex::new(Registry::default()),
        }
    }

    /// The code most recently sent to `phone`, if one is still outstanding.
    pub async fn last_code(&self, phone: &str) -> Option<String> {
        self.registry.lock().await.codes.get(phone).cloned()
    }

    /// The account registered for `phone`, if it has ever verified.
    pub async fn user(&self, phone: &str) -> Option<User> {
        self.registry.lock().await.users.get(phone).cloned()
    }

    /// Copies the sign-up details onto the account created for `phone`.
    pub async fn complete_profile(
        &self,
        phone: &str,
        profile: &SignupProfile,
    ) -> PortResult<User> {
        let mut registry = self.registry.lock().await;
        let user = registry
            .users
            .get_mut(phone)
            .ok_or_else(|| PortError::NotFound(format!("no account for {}", phone)))?;
        user.name = non_blank(&profile.name);
        user.email = non_blank(&profile.email);
        user.updated_at = Utc::now();
        info!(user_id = %user.id, "Account profile completed.");
        Ok(user.clone())
    }

    async fn simulate_network(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{:06}", n)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn is_six_digits(code: &str) -> bool {
    code.len() == 6 && code.chars().all(|c| c.is_ascii_digit())
}

//=========================================================================================
// `OtpService` Trait Implementation
//=========================================================================================

#[async_trait]
impl OtpService for InMemoryOtpService {
    async fn send_code(&self, phone: &str) -> PortResult<()> {
        self.simulate_network().await;
        let code = generate_code();
        // Logged in place of an SMS being delivered.
        info!(%phone, %code, "Verification code issued.");
        self.registry
            .lock()
            .await
            .codes
            .insert(phone.to_string(), code);
        Ok(())
    }

    async fn verify_code(&self, phone: &str, code: &str) -> PortResult<SessionToken> {
        self.simulate_network().await;
        let mut registry = self.registry.lock().await;

        if self.accept_any {
            if !is_six_digits(code) {
                return Err(PortError::Rejected("code must be six digits".to_string()));
            }
        } else {
            let expected = registry
                .codes
                .get(phone)
                .ok_or_else(|| PortError::NotFound(format!("no code was sent to {}", phone)))?;
            if expected != code {
                warn!(%phone, "Verification code mismatch.");
                return Err(PortError::Rejected("code does not match".to_string()));
            }
        }
        registry.codes.remove(phone);

        let now = Utc::now();
        let user = registry
            .users
            .entry(phone.to_string())
            .or_insert_with(|| {
                info!(%phone, points = points::FREE_STARTER, "Account created.");
                User {
                    id: Uuid::new_v4(),
                    phone: phone.to_string(),
                    name: None,
                    email: None,
                    points: points::FREE_STARTER,
                    created_at: now,
                    updated_at: now,
                }
            });
        user.updated_at = now;
        debug!(user_id = %user.id, "Issuing session.");

        Ok(SessionToken {
            token: Uuid::new_v4().simple().to_string(),
            user_id: user.id,
            issued_at: now,
            expires_at: now + ChronoDuration::days(SESSION_DAYS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "+8801712345678";

    #[tokio::test]
    async fn issued_code_verifies_once() {
        let otp = InMemoryOtpService::new(Duration::ZERO, false);
        otp.send_code(PHONE).await.unwrap();
        let code = otp.last_code(PHONE).await.unwrap();
        assert!(is_six_digits(&code));

        let session = otp.verify_code(PHONE, &code).await.unwrap();
        let user = otp.user(PHONE).await.unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(user.points, points::FREE_STARTER);
        assert!(session.expires_at > session.issued_at);

        assert!(otp.last_code(PHONE).await.is_none());
        assert!(matches!(
            otp.verify_code(PHONE, &code).await,
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn wrong_code_is_rejected_and_kept_outstanding() {
        let otp = InMemoryOtpService::new(Duration::ZERO, false);
        otp.send_code(PHONE).await.unwrap();
        let code = otp.last_code(PHONE).await.unwrap();
        let wrong = if code == "000000" { "111111" } else { "000000" };

        assert!(matches!(
            otp.verify_code(PHONE, wrong).await,
            Err(PortError::Rejected(_))
        ));
        assert_eq!(otp.last_code(PHONE).await, Some(code));
        assert!(otp.user(PHONE).await.is_none());
    }

    #[tokio::test]
    async fn returning_user_keeps_account() {
        let otp = InMemoryOtpService::new(Duration::ZERO, true);
        let first = otp.verify_code(PHONE, "123456").await.unwrap();
        let second = otp.verify_code(PHONE, "654321").await.unwrap();
        assert_eq!(first.user_id, second.user_id);
        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn accept_any_still_requires_six_digits() {
        let otp = InMemoryOtpService::new(Duration::ZERO, true);
        assert!(matches!(
            otp.verify_code(PHONE, "12345").await,
            Err(PortError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn profile_lands_on_the_account() {
        let otp = InMemoryOtpService::new(Duration::ZERO, true);
        let profile = SignupProfile {
            name: " Rahim Uddin ".to_string(),
            email: "rahim@example.com".to_string(),
            ..SignupProfile::default()
        };
        assert!(matches!(
            otp.complete_profile(PHONE, &profile).await,
            Err(PortError::NotFound(_))
        ));

        otp.verify_code(PHONE, "123456").await.unwrap();
        let user = otp.complete_profile(PHONE, &profile).await.unwrap();
        assert_eq!(user.name.as_deref(), Some("Rahim Uddin"));
        assert_eq!(user.email.as_deref(), Some("rahim@example.com"));
        assert_eq!(otp.user(PHONE).await, Some(user));
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_simulated() {
        let otp = InMemoryOtpService::new(Duration::from_secs(2), false);
        let started = tokio::time::Instant::now();
        otp.send_code(PHONE).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
