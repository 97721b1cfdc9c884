pub mod auth_flow;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod listing_form;
pub mod otp_input;
pub mod ports;
pub mod store;
pub mod timer;
pub mod validation;

pub use auth_flow::{AuthFlow, AuthFlowConfig, AuthSnapshot, AuthStage};
pub use domain::{
    AuthMode, FileHandle, ListingDraft, ListingDraftSnapshot, ListingId, MediaKind,
    PropertyType, RoomType, SessionToken, SignupProfile, User,
};
pub use error::{FlowError, FlowResult};
pub use i18n::{Language, Message};
pub use listing_form::{
    FieldUpdate, FormAction, FormSnapshot, FormStep, ListingForm, ListingFormConfig, StepCursor,
};
pub use ports::{ListingService, OtpService, PortError, PortResult};
pub use store::{UiState, UiStore};
pub use validation::ValidationError;
