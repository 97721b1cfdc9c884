//! crates/bachelor_point_core/src/domain.rs
//!
//! Defines the pure, core data structures for the marketplace.
//! These structs are independent of any rendering layer or backend.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

//=========================================================================================
// Points
//=========================================================================================

/// Contact-credit constants attached to every account.
pub mod points {
    /// Points granted to a freshly created account.
    pub const FREE_STARTER: u32 = 5;
    /// Points spent to reveal an owner's contact details.
    pub const CONTACT_COST: u32 = 1;
    /// Days before unused points expire.
    pub const EXPIRY_DAYS: i64 = 180;
}

/// A marketplace account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub points: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Credential handed back by the verification service once a code checks out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Identifier assigned to a listing by the submission service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListingId(pub Uuid);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

//=========================================================================================
// Listing Types
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    House,
    Room,
    Studio,
    Hostel,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Room,
        PropertyType::Studio,
        PropertyType::Hostel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Room => "Room",
            PropertyType::Studio => "Studio",
            PropertyType::Hostel => "Hostel",
        }
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown property type '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Shared,
    Family,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Shared => "shared",
            RoomType::Family => "family",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Single => "Single Room",
            RoomType::Shared => "Shared Room",
            RoomType::Family => "Family Room",
        }
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(RoomType::Single),
            "shared" => Ok(RoomType::Shared),
            "family" => Ok(RoomType::Family),
            other => Err(format!("unknown room type '{}'", other)),
        }
    }
}

/// Which media list a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => f.write_str("images"),
            MediaKind::Video => f.write_str("videos"),
        }
    }
}

/// An opaque file handle supplied by the file picker.
///
/// The binary content is shared, never copied, and is left out of serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    #[serde(skip)]
    pub content: Bytes,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size: content.len() as u64,
            content,
        }
    }
}

/// The in-progress listing accumulated across the five form steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    // Basic information
    pub title: String,
    pub description: String,
    pub property_type: Option<PropertyType>,
    pub room_type: Option<RoomType>,

    // Location
    pub division: String,
    pub district: String,
    pub area: String,
    pub address: String,

    // Physical attributes
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub max_occupancy: u32,
    pub total_area: u32,
    pub floor: u32,
    pub total_floors: u32,
    pub furnished: bool,

    // Pricing
    pub monthly_rent: u32,
    pub security_deposit: u32,
    pub electricity_included: bool,
    pub gas_included: bool,
    pub water_included: bool,

    /// Amenity identifiers; order is irrelevant.
    pub amenities: BTreeSet<String>,

    // Contact
    pub owner_name: String,
    pub owner_phone: String,
    pub owner_email: Option<String>,

    // Media
    pub images: Vec<FileHandle>,
    pub videos: Vec<FileHandle>,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            property_type: None,
            room_type: None,
            division: String::new(),
            district: String::new(),
            area: String::new(),
            address: String::new(),
            bedrooms: 1,
            bathrooms: 1,
            max_occupancy: 1,
            total_area: 0,
            floor: 1,
            total_floors: 1,
            furnished: false,
            monthly_rent: 0,
            security_deposit: 0,
            electricity_included: false,
            gas_included: false,
            water_included: false,
            amenities: BTreeSet::new(),
            owner_name: String::new(),
            owner_phone: String::new(),
            owner_email: None,
            images: Vec::new(),
            videos: Vec::new(),
        }
    }
}

impl ListingDraft {
    pub fn media(&self, kind: MediaKind) -> &[FileHandle] {
        match kind {
            MediaKind::Image => &self.images,
            MediaKind::Video => &self.videos,
        }
    }

    pub(crate) fn media_mut(&mut self, kind: MediaKind) -> &mut Vec<FileHandle> {
        match kind {
            MediaKind::Image => &mut self.images,
            MediaKind::Video => &mut self.videos,
        }
    }

    /// Freezes the draft into the immutable form handed to the submission service.
    pub fn snapshot(&self) -> ListingDraftSnapshot {
        ListingDraftSnapshot {
            draft: self.clone(),
            captured_at: Utc::now(),
        }
    }
}

/// Immutable copy of a `ListingDraft`, including its file references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraftSnapshot {
    pub draft: ListingDraft,
    pub captured_at: DateTime<Utc>,
}

impl std::ops::Deref for ListingDraftSnapshot {
    type Target = ListingDraft;

    fn deref(&self) -> &Self::Target {
        &self.draft
    }
}

//=========================================================================================
// Authentication Types
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    Signin,
    Signup,
}

/// Profile fields collected only when creating an account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignupProfile {
    pub name: String,
    pub email: String,
    pub division: String,
    pub district: String,
    pub address: String,
}

impl SignupProfile {
    /// Picks a division; a different division clears the previously chosen district.
    pub fn select_division(&mut self, division: impl Into<String>) {
        let division = division.into();
        if self.division != division {
            self.district.clear();
        }
        self.division = division;
    }
}
