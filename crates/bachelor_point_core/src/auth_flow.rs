//! crates/bachelor_point_core/src/auth_flow.rs
//!
//! Phone/OTP sign-in and sign-up: `PhoneEntry -> OtpEntry -> Success`, with
//! `OtpEntry -> PhoneEntry` when the user wants to change the number.
//!
//! Collaborator calls are made with the lock released. Each call captures the
//! flow's epoch; `close()` and `change_phone()` bump it, so a call that resolves
//! afterwards is dropped instead of mutating the reset state.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{AuthMode, SessionToken, SignupProfile};
use crate::error::{FlowError, FlowResult};
use crate::i18n::Message;
use crate::otp_input::OtpBoxes;
use crate::ports::{with_deadline, OtpService, PortError};
use crate::store::UiStore;
use crate::timer::Countdown;
use crate::validation::{
    format_phone_number, normalize_bd_phone, validate_code, validate_signup, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStage {
    PhoneEntry,
    OtpEntry,
    Success,
}

impl AuthStage {
    pub fn name(self) -> &'static str {
        match self {
            AuthStage::PhoneEntry => "PhoneEntry",
            AuthStage::OtpEntry => "OtpEntry",
            AuthStage::Success => "Success",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthFlowConfig {
    /// Seconds before a new code may be requested.
    pub resend_cooldown_secs: u32,
    /// Countdown period.
    pub tick: Duration,
    pub code_length: usize,
    /// Deadline for each send/verify call.
    pub service_timeout: Duration,
}

impl Default for AuthFlowConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_secs: 60,
            tick: Duration::from_secs(1),
            code_length: 6,
            service_timeout: Duration::from_secs(10),
        }
    }
}

/// Everything a view needs to render the sign-in modal.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSnapshot {
    pub stage: AuthStage,
    pub mode: AuthMode,
    pub phone: String,
    pub display_phone: String,
    pub profile: SignupProfile,
    pub code: OtpBoxes,
    pub resend_countdown_seconds: u32,
    pub can_resend: bool,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub notice: Option<String>,
    pub session: Option<SessionToken>,
    pub modal_open: bool,
}

struct AuthInner {
    stage: AuthStage,
    mode: AuthMode,
    phone: String,
    canonical_phone: Option<String>,
    profile: SignupProfile,
    code: OtpBoxes,
    countdown: Countdown,
    loading: bool,
    error: Option<Message>,
    notice: Option<Message>,
    session: Option<SessionToken>,
    epoch: u64,
    /// Parent of every timer this flow starts; cancelled on close.
    token: CancellationToken,
}

impl AuthInner {
    fn fresh(config: &AuthFlowConfig, epoch: u64) -> Self {
        Self {
            stage: AuthStage::PhoneEntry,
            mode: AuthMode::default(),
            phone: String::new(),
            canonical_phone: None,
            profile: SignupProfile::default(),
            code: OtpBoxes::new(config.code_length),
            countdown: Countdown::idle(),
            loading: false,
            error: None,
            notice: None,
            session: None,
            epoch,
            token: CancellationToken::new(),
        }
    }

    fn expect_stage(&self, stage: AuthStage, action: &'static str) -> FlowResult<()> {
        if self.stage != stage {
            return Err(FlowError::InvalidTransition {
                stage: self.stage.name(),
                action,
            });
        }
        Ok(())
    }

    fn reject(&mut self, error: ValidationError) -> FlowError {
        warn!(stage = self.stage.name(), error = %error, "Auth action rejected.");
        self.error = Some(error.message());
        FlowError::Validation(error)
    }

    fn restart_countdown(&mut self, config: &AuthFlowConfig) {
        self.countdown = Countdown::start(config.resend_cooldown_secs, config.tick, &self.token);
    }
}

#[derive(Clone)]
pub struct AuthFlow {
    inner: Arc<Mutex<AuthInner>>,
    otp: Arc<dyn OtpService>,
    store: UiStore,
    config: AuthFlowConfig,
}

impl AuthFlow {
    pub fn new(otp: Arc<dyn OtpService>, store: UiStore, config: AuthFlowConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AuthInner::fresh(&config, 0))),
            otp,
            store,
            config,
        }
    }

    /// Shows the modal on a fresh flow.
    pub async fn open(&self) {
        self.reset().await;
        self.store.open_sign_in_modal();
        info!("Sign-in flow opened.");
    }

    /// Discards the draft, cancels the countdown and hides the modal.
    /// Calls still in flight resolve into `FlowError::Closed`.
    pub async fn close(&self) {
        self.reset().await;
        self.store.close_sign_in_modal();
        info!("Sign-in flow closed.");
    }

    async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.token.cancel();
        let epoch = inner.epoch + 1;
        *inner = AuthInner::fresh(&self.config, epoch);
    }

    /// Validates the phone (and the profile when signing up) and asks for a code.
    pub async fn request_code(
        &self,
        phone: &str,
        mode: AuthMode,
        profile: Option<SignupProfile>,
    ) -> FlowResult<AuthStage> {
        let (target, epoch) = {
            let mut inner = self.inner.lock().await;
            inner.expect_stage(AuthStage::PhoneEntry, "request_code")?;
            if inner.loading {
                debug!("Code request ignored: already sending.");
                return Err(FlowError::Busy);
            }
            inner.phone = phone.trim().to_string();
            inner.mode = mode;
            if let Some(profile) = profile {
                inner.profile = profile;
            }
            inner.error = None;

            let Some(target) = normalize_bd_phone(&inner.phone) else {
                let invalid = ValidationError::InvalidPhone(inner.phone.clone());
                return Err(inner.reject(invalid));
            };
            if mode == AuthMode::Signup {
                if let Err(e) = validate_signup(&inner.profile) {
                    return Err(inner.reject(e));
                }
            }
            inner.loading = true;
            (target, inner.epoch)
        };

        info!(phone = %target, ?mode, "Sending verification code.");
        let result = with_deadline(self.config.service_timeout, self.otp.send_code(&target)).await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch {
            warn!(phone = %target, "Code dispatch resolved after the flow moved on; ignoring.");
            return Err(FlowError::Closed);
        }
        inner.loading = false;
        match result {
            Ok(()) => {
                inner.canonical_phone = Some(target);
                inner.code.clear();
                inner.stage = AuthStage::OtpEntry;
                inner.restart_countdown(&self.config);
                info!("Verification code sent; waiting for entry.");
                Ok(AuthStage::OtpEntry)
            }
            Err(e) => {
                warn!(error = %e, "Sending the verification code failed.");
                inner.error = Some(FlowError::service_message(&e, Message::OtpSendFailed));
                Err(e.into())
            }
        }
    }

    /// Verifies a complete code. Malformed codes are refused without calling the service.
    pub async fn submit_code(&self, code: &str) -> FlowResult<AuthStage> {
        let (target, epoch) = {
            let mut inner = self.inner.lock().await;
            inner.expect_stage(AuthStage::OtpEntry, "submit_code")?;
            if inner.loading {
                return Err(FlowError::Busy);
            }
            if let Err(e) = validate_code(code, self.config.code_length) {
                return Err(inner.reject(e));
            }
            let Some(target) = inner.canonical_phone.clone() else {
                return Err(FlowError::InvalidTransition {
                    stage: inner.stage.name(),
                    action: "submit_code",
                });
            };
            inner.loading = true;
            inner.error = None;
            (target, inner.epoch)
        };

        info!(phone = %target, "Verifying code.");
        let result = with_deadline(
            self.config.service_timeout,
            self.otp.verify_code(&target, code),
        )
        .await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch {
            warn!(phone = %target, "Verification resolved after the flow moved on; ignoring.");
            return Err(FlowError::Closed);
        }
        inner.loading = false;
        match result {
            Ok(session) => {
                info!(user_id = %session.user_id, "Phone verified.");
                inner.countdown.cancel();
                inner.session = Some(session);
                inner.notice = Some(match inner.mode {
                    AuthMode::Signup => Message::AccountCreated,
                    AuthMode::Signin => Message::WelcomeBack,
                });
                inner.stage = AuthStage::Success;
                Ok(AuthStage::Success)
            }
            Err(e) => {
                warn!(error = %e, "Code verification failed.");
                let fallback = match e {
                    PortError::Rejected(_) | PortError::Unauthorized => Message::InvalidOtp,
                    _ => Message::OtpVerifyFailed,
                };
                inner.error = Some(FlowError::service_message(&e, fallback));
                inner.code.clear();
                Err(e.into())
            }
        }
    }

    /// Types one digit into box `index`; the completed code is submitted automatically.
    pub async fn input_digit(&self, index: usize, ch: char) -> FlowResult<AuthStage> {
        let completed = {
            let mut inner = self.inner.lock().await;
            inner.expect_stage(AuthStage::OtpEntry, "input_digit")?;
            if inner.loading {
                return Err(FlowError::Busy);
            }
            inner.code.input(index, ch)
        };
        match completed {
            Some(code) => self.submit_code(&code).await,
            None => Ok(AuthStage::OtpEntry),
        }
    }

    pub async fn backspace(&self, index: usize) -> FlowResult<()> {
        let mut inner = self.inner.lock().await;
        inner.expect_stage(AuthStage::OtpEntry, "backspace")?;
        inner.code.backspace(index);
        Ok(())
    }

    /// Sends a fresh code once the countdown has run out.
    pub async fn resend_code(&self) -> FlowResult<()> {
        let (target, epoch) = {
            let mut inner = self.inner.lock().await;
            inner.expect_stage(AuthStage::OtpEntry, "resend_code")?;
            if inner.loading {
                return Err(FlowError::Busy);
            }
            let remaining = inner.countdown.remaining();
            if remaining > 0 {
                return Err(inner.reject(ValidationError::ResendNotReady { remaining }));
            }
            let Some(target) = inner.canonical_phone.clone() else {
                return Err(FlowError::InvalidTransition {
                    stage: inner.stage.name(),
                    action: "resend_code",
                });
            };
            inner.loading = true;
            inner.error = None;
            (target, inner.epoch)
        };

        info!(phone = %target, "Resending verification code.");
        let result = with_deadline(self.config.service_timeout, self.otp.send_code(&target)).await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch {
            return Err(FlowError::Closed);
        }
        inner.loading = false;
        match result {
            Ok(()) => {
                inner.code.clear();
                inner.restart_countdown(&self.config);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Resending the verification code failed.");
                inner.error = Some(FlowError::service_message(&e, Message::OtpResendFailed));
                Err(e.into())
            }
        }
    }

    /// Back to phone entry, keeping the typed number for editing.
    pub async fn change_phone(&self) -> FlowResult<AuthStage> {
        let mut inner = self.inner.lock().await;
        inner.expect_stage(AuthStage::OtpEntry, "change_phone")?;
        inner.epoch += 1;
        inner.loading = false;
        inner.countdown = Countdown::idle();
        inner.code.clear();
        inner.canonical_phone = None;
        inner.error = None;
        inner.stage = AuthStage::PhoneEntry;
        info!(phone = %inner.phone, "Returned to phone entry.");
        Ok(AuthStage::PhoneEntry)
    }

    pub async fn stage(&self) -> AuthStage {
        self.inner.lock().await.stage
    }

    pub async fn snapshot(&self) -> AuthSnapshot {
        let inner = self.inner.lock().await;
        let ui = self.store.state();
        let remaining = inner.countdown.remaining();
        AuthSnapshot {
            stage: inner.stage,
            mode: inner.mode,
            phone: inner.phone.clone(),
            display_phone: format_phone_number(&inner.phone),
            profile: inner.profile.clone(),
            code: inner.code.clone(),
            resend_countdown_seconds: remaining,
            can_resend: inner.stage == AuthStage::OtpEntry && remaining == 0 && !inner.loading,
            is_loading: inner.loading,
            error_message: inner.error.map(|m| m.text(ui.language).to_string()),
            notice: inner.notice.map(|m| m.text(ui.language).to_string()),
            session: inner.session.clone(),
            modal_open: ui.sign_in_modal_open,
        }
    }
}
