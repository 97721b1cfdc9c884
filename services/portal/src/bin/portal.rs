//! services/portal/src/bin/portal.rs

use bachelor_point_core::domain::{
    AuthMode, FileHandle, MediaKind, PropertyType, RoomType, SignupProfile,
};
use bachelor_point_core::validation::normalize_bd_phone;
use bachelor_point_core::{AuthFlow, AuthStage, FieldUpdate, ListingForm, UiStore};
use portal_lib::{
    adapters::{InMemoryListingService, InMemoryOtpService},
    config::Config,
    dashboard::{Dashboard, StatusFilter},
    error::AppError,
};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_PHONE: &str = "01712345678";

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<(), AppError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "--- {} ---\n{}", label, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting portal...");

    // --- 2. Initialize Service Adapters ---
    let store = UiStore::new(config.default_language);
    let otp = Arc::new(InMemoryOtpService::new(
        config.simulated_latency,
        config.otp_accept_any,
    ));
    let dashboard = Dashboard::new();
    let listings = Arc::new(InMemoryListingService::new(
        config.simulated_latency,
        dashboard.clone(),
    ));

    // --- 3. Sign Up With Phone Verification ---
    let auth = AuthFlow::new(otp.clone(), store.clone(), config.auth_flow_config());
    auth.open().await;

    let mut profile = SignupProfile {
        name: "Rahim Uddin".to_string(),
        email: "rahim@example.com".to_string(),
        address: "House 12, Road 5, Dhanmondi".to_string(),
        ..SignupProfile::default()
    };
    profile.select_division("Dhaka");
    profile.district = "Dhaka".to_string();

    auth.request_code(DEMO_PHONE, AuthMode::Signup, Some(profile)).await?;
    let canonical = normalize_bd_phone(DEMO_PHONE)
        .ok_or_else(|| AppError::Internal(format!("'{}' is not a valid phone", DEMO_PHONE)))?;
    let code = otp
        .last_code(&canonical)
        .await
        .ok_or_else(|| AppError::Internal("no verification code was issued".to_string()))?;

    let mut stage = AuthStage::OtpEntry;
    for (index, digit) in code.chars().enumerate() {
        stage = auth.input_digit(index, digit).await?;
    }
    if stage != AuthStage::Success {
        return Err(AppError::Internal(format!("sign-up stopped at {}", stage.name())));
    }
    let snapshot = auth.snapshot().await;
    print_json("auth", &snapshot)?;
    let user = otp.complete_profile(&canonical, &snapshot.profile).await?;
    info!(user_id = %user.id, points = user.points, "Signed in.");
    print_json("user", &user)?;
    auth.close().await;

    // --- 4. Post a Listing Through All Five Steps ---
    let form = ListingForm::new(listings.clone(), store.clone(), config.listing_form_config());

    form.set_field(FieldUpdate::Title("Furnished single room near Dhanmondi Lake".into()))
        .await?;
    form.set_field(FieldUpdate::Description(
        "Bright room with attached bath, suitable for a working professional.".into(),
    ))
    .await?;
    form.set_field(FieldUpdate::PropertyType(PropertyType::Apartment)).await?;
    form.set_field(FieldUpdate::RoomType(RoomType::Single)).await?;
    form.next().await?;

    for update in [
        FieldUpdate::Division("Dhaka".into()),
        FieldUpdate::District("Dhaka".into()),
        FieldUpdate::Area("Dhanmondi".into()),
        FieldUpdate::Address("House 12, Road 5".into()),
        FieldUpdate::Floor("4".into()),
        FieldUpdate::TotalFloors("7".into()),
    ] {
        form.set_field(update).await?;
    }
    form.next().await?;

    form.set_field(FieldUpdate::TotalArea("180".into())).await?;
    form.set_field(FieldUpdate::Furnished(true)).await?;
    for amenity in ["wifi", "generator", "lift"] {
        form.toggle_amenity(amenity).await?;
    }
    form.next().await?;

    form.set_field(FieldUpdate::MonthlyRent("9500".into())).await?;
    form.set_field(FieldUpdate::SecurityDeposit("9500".into())).await?;
    form.set_field(FieldUpdate::WaterIncluded(true)).await?;
    form.set_field(FieldUpdate::OwnerName("Rahim Uddin".into())).await?;
    form.set_field(FieldUpdate::OwnerPhone(DEMO_PHONE.into())).await?;
    form.next().await?;

    form.add_files(
        MediaKind::Image,
        vec![
            FileHandle::new("room.jpg", vec![0u8; 2048]),
            FileHandle::new("bath.jpg", vec![0u8; 1024]),
        ],
    )
    .await?;
    let id = form.submit().await?;
    info!(listing_id = %id, "Listing posted.");
    print_json("form", &form.snapshot().await)?;

    // --- 5. Show the Dashboard ---
    dashboard.record_view(id).await?;
    print_json("posts", &dashboard.posts(StatusFilter::All, "").await)?;
    print_json("stats", &dashboard.stats().await)?;

    Ok(())
}
