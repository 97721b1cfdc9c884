//! crates/bachelor_point_core/src/listing_form.rs
//!
//! The five-step "post a rental" wizard.
//!
//! The pure part (`StepCursor`, `FormState::reduce`) is a reducer over a tagged
//! `FormAction`. `ListingForm` wraps it in a shared handle that owns the submitting
//! flag, talks to the `ListingService`, and drops results that arrive after a discard.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{FileHandle, ListingDraft, ListingId, MediaKind, PropertyType, RoomType};
use crate::error::{FlowError, FlowResult};
use crate::i18n::Message;
use crate::ports::{with_deadline, ListingService};
use crate::store::UiStore;
use crate::validation::{coerce_count, ValidationError};

//=========================================================================================
// Steps
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    BasicInfo,
    Location,
    Details,
    Pricing,
    Media,
}

impl FormStep {
    pub const TOTAL: u8 = 5;

    pub fn number(self) -> u8 {
        match self {
            FormStep::BasicInfo => 1,
            FormStep::Location => 2,
            FormStep::Details => 3,
            FormStep::Pricing => 4,
            FormStep::Media => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(FormStep::BasicInfo),
            2 => Some(FormStep::Location),
            3 => Some(FormStep::Details),
            4 => Some(FormStep::Pricing),
            5 => Some(FormStep::Media),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormStep::BasicInfo => "Basic Information",
            FormStep::Location => "Location Details",
            FormStep::Details => "Property Details",
            FormStep::Pricing => "Pricing & Utilities",
            FormStep::Media => "Photos & Videos",
        }
    }

    /// The draft fields presented on this step.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            FormStep::BasicInfo => &["title", "description", "property_type", "room_type"],
            FormStep::Location => &[
                "division",
                "district",
                "area",
                "address",
                "floor",
                "total_floors",
            ],
            FormStep::Details => &[
                "bedrooms",
                "bathrooms",
                "max_occupancy",
                "total_area",
                "furnished",
                "amenities",
            ],
            FormStep::Pricing => &[
                "monthly_rent",
                "security_deposit",
                "electricity_included",
                "gas_included",
                "water_included",
                "owner_name",
                "owner_phone",
                "owner_email",
            ],
            FormStep::Media => &["images", "videos"],
        }
    }

    /// Required fields of this step that are still empty in `draft`.
    pub fn missing_fields(self, draft: &ListingDraft) -> Vec<&'static str> {
        let checks: Vec<(&'static str, bool)> = match self {
            FormStep::BasicInfo => vec![
                ("title", draft.title.trim().is_empty()),
                ("description", draft.description.trim().is_empty()),
                ("property_type", draft.property_type.is_none()),
                ("room_type", draft.room_type.is_none()),
            ],
            FormStep::Location => vec![
                ("division", draft.division.trim().is_empty()),
                ("district", draft.district.trim().is_empty()),
                ("area", draft.area.trim().is_empty()),
                ("address", draft.address.trim().is_empty()),
            ],
            FormStep::Details => Vec::new(),
            FormStep::Pricing => vec![
                ("monthly_rent", draft.monthly_rent == 0),
                ("owner_name", draft.owner_name.trim().is_empty()),
                ("owner_phone", draft.owner_phone.trim().is_empty()),
            ],
            FormStep::Media => Vec::new(),
        };
        checks
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Position in the wizard, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepCursor {
    current: u8,
}

impl Default for StepCursor {
    fn default() -> Self {
        Self { current: 1 }
    }
}

impl StepCursor {
    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn step(&self) -> FormStep {
        FormStep::from_number(self.current).unwrap_or(FormStep::BasicInfo)
    }

    pub fn is_last(&self) -> bool {
        self.current == FormStep::TOTAL
    }

    /// Advances one step. Returns `false` (and stays put) on the last step.
    pub fn next(&mut self) -> bool {
        if self.current < FormStep::TOTAL {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one step. Returns `false` (and stays put) on the first step.
    pub fn prev(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn progress(&self) -> f32 {
        f32::from(self.current) / f32::from(FormStep::TOTAL)
    }
}

//=========================================================================================
// Actions
//=========================================================================================

/// A typed field write. Count fields carry the raw text the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Description(String),
    PropertyType(PropertyType),
    RoomType(RoomType),
    Division(String),
    District(String),
    Area(String),
    Address(String),
    Bedrooms(String),
    Bathrooms(String),
    MaxOccupancy(String),
    TotalArea(String),
    Floor(String),
    TotalFloors(String),
    Furnished(bool),
    MonthlyRent(String),
    SecurityDeposit(String),
    ElectricityIncluded(bool),
    GasIncluded(bool),
    WaterIncluded(bool),
    OwnerName(String),
    OwnerPhone(String),
    OwnerEmail(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Set(FieldUpdate),
    ToggleAmenity(String),
    AddFiles(MediaKind, Vec<FileHandle>),
    RemoveFile(MediaKind, usize),
    Next,
    Prev,
}

impl ListingDraft {
    /// Writes one field, coercing counts so the draft never holds an invalid value.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Title(v) => self.title = v,
            FieldUpdate::Description(v) => self.description = v,
            FieldUpdate::PropertyType(v) => self.property_type = Some(v),
            FieldUpdate::RoomType(v) => self.room_type = Some(v),
            FieldUpdate::Division(v) => self.division = v,
            FieldUpdate::District(v) => self.district = v,
            FieldUpdate::Area(v) => self.area = v,
            FieldUpdate::Address(v) => self.address = v,
            FieldUpdate::Bedrooms(raw) => self.bedrooms = coerce_count(&raw, 1),
            FieldUpdate::Bathrooms(raw) => self.bathrooms = coerce_count(&raw, 1),
            FieldUpdate::MaxOccupancy(raw) => self.max_occupancy = coerce_count(&raw, 1),
            FieldUpdate::TotalArea(raw) => self.total_area = coerce_count(&raw, 0),
            FieldUpdate::Floor(raw) => {
                self.floor = coerce_count(&raw, 1);
                self.total_floors = self.total_floors.max(self.floor);
            }
            FieldUpdate::TotalFloors(raw) => {
                self.total_floors = coerce_count(&raw, 1).max(self.floor);
            }
            FieldUpdate::Furnished(v) => self.furnished = v,
            FieldUpdate::MonthlyRent(raw) => self.monthly_rent = coerce_count(&raw, 0),
            FieldUpdate::SecurityDeposit(raw) => self.security_deposit = coerce_count(&raw, 0),
            FieldUpdate::ElectricityIncluded(v) => self.electricity_included = v,
            FieldUpdate::GasIncluded(v) => self.gas_included = v,
            FieldUpdate::WaterIncluded(v) => self.water_included = v,
            FieldUpdate::OwnerName(v) => self.owner_name = v,
            FieldUpdate::OwnerPhone(v) => self.owner_phone = v,
            FieldUpdate::OwnerEmail(v) => {
                let trimmed = v.trim();
                self.owner_email = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
        }
    }

    /// Adds `id` if absent, removes it if present. Unknown ids are kept as free-form tags.
    pub fn toggle_amenity(&mut self, id: &str) {
        if !self.amenities.remove(id) {
            self.amenities.insert(id.to_string());
        }
    }

    /// Appends `files` in order, or rejects the whole batch if it would pass `limit`.
    pub fn add_files(
        &mut self,
        kind: MediaKind,
        files: Vec<FileHandle>,
        limit: usize,
    ) -> Result<(), ValidationError> {
        let list = self.media_mut(kind);
        if list.len() + files.len() > limit {
            return Err(ValidationError::MediaLimit { kind, limit });
        }
        list.extend(files);
        Ok(())
    }

    /// Removes the file at `index`. Out-of-range indices leave the list untouched.
    pub fn remove_file(&mut self, kind: MediaKind, index: usize) -> bool {
        let list = self.media_mut(kind);
        if index < list.len() {
            list.remove(index);
            true
        } else {
            false
        }
    }
}

//=========================================================================================
// Pure State
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingFormConfig {
    pub max_images: usize,
    pub max_videos: usize,
    pub submit_timeout: Duration,
}

impl Default for ListingFormConfig {
    fn default() -> Self {
        Self {
            max_images: 10,
            max_videos: 2,
            submit_timeout: Duration::from_secs(30),
        }
    }
}

impl ListingFormConfig {
    pub fn limit(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::Image => self.max_images,
            MediaKind::Video => self.max_videos,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub draft: ListingDraft,
    pub cursor: StepCursor,
}

impl FormState {
    /// The single reducer every form mutation goes through.
    pub fn reduce(
        &mut self,
        action: FormAction,
        config: &ListingFormConfig,
    ) -> Result<(), ValidationError> {
        match action {
            FormAction::Set(update) => self.draft.apply(update),
            FormAction::ToggleAmenity(id) => self.draft.toggle_amenity(&id),
            FormAction::AddFiles(kind, files) => {
                self.draft.add_files(kind, files, config.limit(kind))?
            }
            FormAction::RemoveFile(kind, index) => {
                self.draft.remove_file(kind, index);
            }
            FormAction::Next => {
                self.cursor.next();
            }
            FormAction::Prev => {
                self.cursor.prev();
            }
        }
        Ok(())
    }
}

//=========================================================================================
// Shared Handle
//=========================================================================================

/// What a view needs to render the wizard.
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub step: u8,
    pub total_steps: u8,
    pub step_title: &'static str,
    pub progress: f32,
    pub draft: ListingDraft,
    pub missing_fields: Vec<&'static str>,
    pub is_submitting: bool,
    pub error_message: Option<String>,
    pub notice: Option<String>,
    pub last_submitted: Option<ListingId>,
}

#[derive(Debug, Default)]
struct FormInner {
    state: FormState,
    submitting: bool,
    error: Option<Message>,
    notice: Option<Message>,
    last_submitted: Option<ListingId>,
    epoch: u64,
}

#[derive(Clone)]
pub struct ListingForm {
    inner: Arc<Mutex<FormInner>>,
    service: Arc<dyn ListingService>,
    store: UiStore,
    config: ListingFormConfig,
}

impl ListingForm {
    pub fn new(
        service: Arc<dyn ListingService>,
        store: UiStore,
        config: ListingFormConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FormInner::default())),
            service,
            store,
            config,
        }
    }

    /// Applies one action. Refused with `Busy` while a submit is pending.
    pub async fn dispatch(&self, action: FormAction) -> FlowResult<()> {
        let mut inner = self.inner.lock().await;
        if inner.submitting {
            debug!(?action, "Form action ignored while submitting.");
            return Err(FlowError::Busy);
        }
        match inner.state.reduce(action, &self.config) {
            Ok(()) => {
                inner.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Form action rejected.");
                inner.error = Some(e.message());
                Err(e.into())
            }
        }
    }

    pub async fn set_field(&self, update: FieldUpdate) -> FlowResult<()> {
        self.dispatch(FormAction::Set(update)).await
    }

    pub async fn toggle_amenity(&self, id: impl Into<String>) -> FlowResult<()> {
        self.dispatch(FormAction::ToggleAmenity(id.into())).await
    }

    pub async fn add_files(&self, kind: MediaKind, files: Vec<FileHandle>) -> FlowResult<()> {
        self.dispatch(FormAction::AddFiles(kind, files)).await
    }

    pub async fn remove_file(&self, kind: MediaKind, index: usize) -> FlowResult<()> {
        self.dispatch(FormAction::RemoveFile(kind, index)).await
    }

    pub async fn next(&self) -> FlowResult<u8> {
        self.dispatch(FormAction::Next).await?;
        Ok(self.current_step().await)
    }

    pub async fn prev(&self) -> FlowResult<u8> {
        self.dispatch(FormAction::Prev).await?;
        Ok(self.current_step().await)
    }

    pub async fn current_step(&self) -> u8 {
        self.inner.lock().await.state.cursor.current()
    }

    /// Required fields of the current step that are still empty. Never blocks `next()`.
    pub async fn step_issues(&self) -> Vec<&'static str> {
        let inner = self.inner.lock().await;
        inner.state.cursor.step().missing_fields(&inner.state.draft)
    }

    /// Hands the draft to the listing service. Only valid on the last step.
    ///
    /// On success the draft is discarded and the wizard restarts at step 1.
    /// On failure the form stays on the last step with an error to show.
    pub async fn submit(&self) -> FlowResult<ListingId> {
        let (snapshot, epoch) = {
            let mut inner = self.inner.lock().await;
            if inner.submitting {
                return Err(FlowError::Busy);
            }
            if !inner.state.cursor.is_last() {
                return Err(FlowError::InvalidTransition {
                    stage: inner.state.cursor.step().title(),
                    action: "submit",
                });
            }
            inner.submitting = true;
            inner.error = None;
            inner.notice = None;
            (inner.state.draft.snapshot(), inner.epoch)
        };

        info!(title = %snapshot.title, images = snapshot.images.len(), "Submitting listing.");
        let result = with_deadline(
            self.config.submit_timeout,
            self.service.submit_listing(snapshot),
        )
        .await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch {
            warn!("Listing submission resolved after the form was discarded; ignoring.");
            return Err(FlowError::Closed);
        }
        inner.submitting = false;
        match result {
            Ok(id) => {
                info!(listing_id = %id, "Listing submitted.");
                inner.state = FormState::default();
                inner.last_submitted = Some(id);
                inner.notice = Some(Message::ListingPosted);
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "Listing submission failed.");
                inner.error = Some(FlowError::service_message(&e, Message::ListingPostFailed));
                Err(e.into())
            }
        }
    }

    /// Throws the draft away. A submit still in flight will be ignored when it resolves.
    pub async fn discard(&self) {
        let mut inner = self.inner.lock().await;
        let epoch = inner.epoch + 1;
        *inner = FormInner {
            epoch,
            ..FormInner::default()
        };
        info!("Listing draft discarded.");
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let inner = self.inner.lock().await;
        let language = self.store.language();
        let cursor = inner.state.cursor;
        FormSnapshot {
            step: cursor.current(),
            total_steps: FormStep::TOTAL,
            step_title: cursor.step().title(),
            progress: cursor.progress(),
            draft: inner.state.draft.clone(),
            missing_fields: cursor.step().missing_fields(&inner.state.draft),
            is_submitting: inner.submitting,
            error_message: inner.error.map(|m| m.text(language).to_string()),
            notice: inner.notice.map(|m| m.text(language).to_string()),
            last_submitted: inner.last_submitted,
        }
    }
}
