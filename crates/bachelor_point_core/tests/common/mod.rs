//! Fake collaborators shared by the flow tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bachelor_point_core::domain::{ListingDraftSnapshot, ListingId, SessionToken};
use bachelor_point_core::ports::{ListingService, OtpService, PortError, PortResult};
use chrono::{Duration as ChronoDuration, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

pub struct FakeOtp {
    pub latency: Duration,
    pub expected_code: Option<String>,
    pub fail_send: AtomicBool,
    pub sends: AtomicUsize,
    pub verifies: AtomicUsize,
    pub phones: Mutex<Vec<String>>,
}

impl FakeOtp {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_secs(2),
            expected_code: None,
            fail_send: AtomicBool::new(false),
            sends: AtomicUsize::new(0),
            verifies: AtomicUsize::new(0),
            phones: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn expecting(mut self, code: &str) -> Self {
        self.expected_code = Some(code.to_string());
        self
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    pub fn verifies(&self) -> usize {
        self.verifies.load(Ordering::SeqCst)
    }

    pub fn last_phone(&self) -> Option<String> {
        self.phones.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl OtpService for FakeOtp {
    async fn send_code(&self, phone: &str) -> PortResult<()> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.phones.lock().unwrap().push(phone.to_string());
        tokio::time::sleep(self.latency).await;
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("sms gateway unavailable".into()));
        }
        Ok(())
    }

    async fn verify_code(&self, phone: &str, code: &str) -> PortResult<SessionToken> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        if let Some(expected) = &self.expected_code {
            if expected != code {
                return Err(PortError::Rejected(format!("wrong code for {}", phone)));
            }
        }
        let now = Utc::now();
        Ok(SessionToken {
            token: format!("session-{}", phone),
            user_id: Uuid::new_v4(),
            issued_at: now,
            expires_at: now + ChronoDuration::days(30),
        })
    }
}

pub struct FakeListings {
    pub latency: Duration,
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
    pub received: Mutex<Vec<ListingDraftSnapshot>>,
}

impl FakeListings {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_secs(2),
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingService for FakeListings {
    async fn submit_listing(&self, draft: ListingDraftSnapshot) -> PortResult<ListingId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        if self.fail.load(Ordering::SeqCst) {
            return Err(PortError::Rejected("listing backend refused the draft".into()));
        }
        self.received.lock().unwrap().push(draft);
        Ok(ListingId(Uuid::new_v4()))
    }
}
