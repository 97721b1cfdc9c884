//! services/portal/src/dashboard.rs
//!
//! The owner's view of posted listings: filtering, search, headline numbers and
//! status changes. Backed by the same in-memory store the listing adapter writes to.

use bachelor_point_core::domain::{ListingDraftSnapshot, ListingId};
use bachelor_point_core::ports::{PortError, PortResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Paused,
    Rented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Paused,
    Rented,
}

impl StatusFilter {
    fn matches(self, status: ListingStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == ListingStatus::Active,
            StatusFilter::Paused => status == ListingStatus::Paused,
            StatusFilter::Rented => status == ListingStatus::Rented,
        }
    }
}

/// A submitted listing as the dashboard sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub id: ListingId,
    pub snapshot: ListingDraftSnapshot,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub views: u64,
    pub favorites: u64,
    pub messages: u64,
}

impl ListingRecord {
    pub fn new(id: ListingId, snapshot: ListingDraftSnapshot) -> Self {
        Self {
            id,
            snapshot,
            status: ListingStatus::Active,
            created_at: Utc::now(),
            views: 0,
            favorites: 0,
            messages: 0,
        }
    }

    fn matches_query(&self, needle: &str) -> bool {
        [
            &self.snapshot.title,
            &self.snapshot.area,
            &self.snapshot.district,
            &self.snapshot.division,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub views: u64,
    pub messages: u64,
}

#[derive(Clone, Default)]
pub struct Dashboard {
    records: Arc<RwLock<Vec<ListingRecord>>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn insert(&self, record: ListingRecord) {
        self.records.write().await.push(record);
    }

    /// Listings matching `filter` and `query`, newest first. A blank query matches everything.
    pub async fn posts(&self, filter: StatusFilter, query: &str) -> Vec<ListingRecord> {
        let needle = query.trim().to_lowercase();
        let records = self.records.read().await;
        let mut posts: Vec<ListingRecord> = records
            .iter()
            .rev()
            .filter(|r| filter.matches(r.status))
            .filter(|r| needle.is_empty() || r.matches_query(&needle))
            .cloned()
            .collect();
        // Stable, so records created in the same instant stay newest-first.
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    pub async fn get(&self, id: ListingId) -> PortResult<ListingRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub async fn stats(&self) -> DashboardStats {
        let records = self.records.read().await;
        DashboardStats {
            total: records.len(),
            active: records
                .iter()
                .filter(|r| r.status == ListingStatus::Active)
                .count(),
            views: records.iter().map(|r| r.views).sum(),
            messages: records.iter().map(|r| r.messages).sum(),
        }
    }

    pub async fn set_status(&self, id: ListingId, status: ListingStatus) -> PortResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        record.status = status;
        info!(listing_id = %id, ?status, "Listing status changed.");
        Ok(())
    }

    pub async fn record_view(&self, id: ListingId) -> PortResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        record.views += 1;
        Ok(())
    }

    pub async fn delete(&self, id: ListingId) -> PortResult<ListingRecord> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        info!(listing_id = %id, "Listing deleted.");
        Ok(records.remove(index))
    }
}

fn not_found(id: ListingId) -> PortError {
    PortError::NotFound(format!("listing {}", id))
}
