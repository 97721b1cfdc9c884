//! Drives both flows against the in-memory adapters, the way the portal binary wires them.

use bachelor_point_core::domain::{points, AuthMode, FileHandle, MediaKind, SignupProfile};
use bachelor_point_core::{
    AuthFlow, AuthStage, FieldUpdate, FlowError, Language, ListingForm, PortError, UiStore,
};
use portal_lib::adapters::{InMemoryListingService, InMemoryOtpService};
use portal_lib::config::Config;
use portal_lib::dashboard::{Dashboard, ListingStatus, StatusFilter};
use std::sync::Arc;

const PHONE: &str = "01812345678";
const CANONICAL: &str = "+8801812345678";

fn config() -> Config {
    Config::from_lookup(|_| None).unwrap()
}

fn profile() -> SignupProfile {
    SignupProfile {
        name: "Nusrat".to_string(),
        email: "nusrat@example.com".to_string(),
        division: "Chittagong".to_string(),
        district: "Cox's Bazar".to_string(),
        address: "Kolatoli Road".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn sign_up_with_the_issued_code() {
    let config = config();
    let otp = Arc::new(InMemoryOtpService::new(config.simulated_latency, false));
    let auth = AuthFlow::new(otp.clone(), UiStore::default(), config.auth_flow_config());
    auth.open().await;

    assert_eq!(
        auth.request_code(PHONE, AuthMode::Signup, Some(profile())).await,
        Ok(AuthStage::OtpEntry)
    );
    let code = otp.last_code(CANONICAL).await.unwrap();
    let mut stage = AuthStage::OtpEntry;
    for (i, ch) in code.chars().enumerate() {
        stage = auth.input_digit(i, ch).await.unwrap();
    }
    assert_eq!(stage, AuthStage::Success);

    let snap = auth.snapshot().await;
    assert_eq!(snap.notice.as_deref(), Some("Account Created Successfully!"));
    let user = otp.user(CANONICAL).await.unwrap();
    assert_eq!(snap.session.as_ref().unwrap().user_id, user.id);
    assert_eq!(user.points, points::FREE_STARTER);

    let user = otp.complete_profile(CANONICAL, &snap.profile).await.unwrap();
    assert_eq!(user.name.as_deref(), Some("Nusrat"));
    assert_eq!(user.email.as_deref(), Some("nusrat@example.com"));
}

#[tokio::test(start_paused = true)]
async fn wrong_code_then_right_code() {
    let config = config();
    let otp = Arc::new(InMemoryOtpService::new(config.simulated_latency, false));
    let store = UiStore::new(Language::Bn);
    let auth = AuthFlow::new(otp.clone(), store, config.auth_flow_config());

    auth.request_code(PHONE, AuthMode::Signin, None).await.unwrap();
    let code = otp.last_code(CANONICAL).await.unwrap();
    let wrong = if code == "999999" { "000000" } else { "999999" };

    assert!(matches!(
        auth.submit_code(wrong).await,
        Err(FlowError::Service(PortError::Rejected(_)))
    ));
    let snap = auth.snapshot().await;
    assert_eq!(snap.stage, AuthStage::OtpEntry);
    assert!(snap.error_message.is_some());
    assert_eq!(snap.code.code(), None);

    assert_eq!(auth.submit_code(&code).await, Ok(AuthStage::Success));
}

#[tokio::test(start_paused = true)]
async fn posted_listing_shows_on_the_dashboard() {
    let config = config();
    let dashboard = Dashboard::new();
    let listings = Arc::new(InMemoryListingService::new(
        config.simulated_latency,
        dashboard.clone(),
    ));
    let form = ListingForm::new(listings.clone(), UiStore::default(), config.listing_form_config());

    form.set_field(FieldUpdate::Title("Sea-view studio".into())).await.unwrap();
    form.set_field(FieldUpdate::Division("Chittagong".into())).await.unwrap();
    form.set_field(FieldUpdate::Area("Kolatoli".into())).await.unwrap();
    form.add_files(MediaKind::Video, vec![FileHandle::new("walk.mp4", vec![7u8; 64])])
        .await
        .unwrap();
    for expected in 2..=5 {
        assert_eq!(form.next().await, Ok(expected));
    }
    let id = form.submit().await.unwrap();

    let posts = dashboard.posts(StatusFilter::Active, "kolatoli").await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, id);
    assert_eq!(posts[0].snapshot.videos[0].name, "walk.mp4");
    assert_eq!(listings.audit_entries().await.len(), 1);

    dashboard.set_status(id, ListingStatus::Rented).await.unwrap();
    assert!(dashboard.posts(StatusFilter::Active, "").await.is_empty());
    assert_eq!(dashboard.stats().await.active, 0);
    assert_eq!(form.snapshot().await.last_submitted, Some(id));
}
