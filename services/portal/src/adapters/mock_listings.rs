//! services/portal/src/adapters/mock_listings.rs
//!
//! An in-memory implementation of the `ListingService` port. Each submission is
//! recorded on the `Dashboard` as an active listing and appended to a JSON audit trail.

use async_trait::async_trait;
use bachelor_point_core::domain::{ListingDraftSnapshot, ListingId};
use bachelor_point_core::ports::{ListingService, PortError, PortResult};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::dashboard::{Dashboard, ListingRecord};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `ListingService` port on top of a `Dashboard`.
pub struct InMemoryListingService {
    latency: Duration,
    dashboard: Dashboard,
    audit: Mutex<Vec<String>>,
}

impl InMemoryListingService {
    /// Creates a new `InMemoryListingService` that publishes into `dashboard`.
    pub fn new(latency: Duration, dashboard: Dashboard) -> Self {
        Self {
            latency,
            dashboard,
            audit: Mutex::new(Vec::new()),
        }
    }

    /// One JSON document per accepted submission, oldest first.
    pub async fn audit_entries(&self) -> Vec<String> {
        self.audit.lock().await.clone()
    }
}

//=========================================================================================
// `ListingService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ListingService for InMemoryListingService {
    async fn submit_listing(&self, draft: ListingDraftSnapshot) -> PortResult<ListingId> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let id = ListingId(Uuid::new_v4());
        let record = ListingRecord::new(id, draft);
        let entry = serde_json::to_string(&record)
            .map_err(|e| PortError::Unexpected(format!("could not encode listing: {}", e)))?;
        debug!(listing_id = %id, bytes = entry.len(), "Listing audit entry written.");
        self.audit.lock().await.push(entry);

        info!(
            listing_id = %id,
            title = %record.snapshot.title,
            images = record.snapshot.images.len(),
            videos = record.snapshot.videos.len(),
            "Listing published."
        );
        self.dashboard.insert(record).await;
        Ok(id)
    }
}
