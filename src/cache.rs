//! Keyed request cache: deduplicates concurrent identical fetches and
//! memoizes successful results until a mutation invalidates the key. No
//! eviction and no staleness window; entries live until invalidated.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::models::ListingSearch;

#[derive(Default)]
pub struct RequestCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<Value>>>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch through the cache. Concurrent callers with the same key share
    /// a single run of `loader`; later callers get the memoized value.
    /// Failed loads are never cached, so the next caller retries.
    pub async fn fetch<T, F, Fut>(&self, key: &str, loader: F) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(key.to_string()).or_default().clone()
        };

        let value = cell
            .get_or_try_init(|| async {
                debug!(key, "cache miss, loading");
                let fresh = loader().await?;
                serde_json::to_value(fresh).map_err(ApiError::from)
            })
            .await?;

        serde_json::from_value(value.clone()).map_err(ApiError::from)
    }

    /// Drop one key so the next read refetches. Called synchronously after
    /// every successful mutation that touches the keyed resource.
    pub async fn invalidate(&self, key: &str) {
        debug!(key, "cache invalidate");
        self.entries.lock().await.remove(key);
    }

    /// Drop every key under a prefix (e.g. all listing queries after a
    /// listing mutation).
    pub async fn invalidate_prefix(&self, prefix: &str) {
        debug!(prefix, "cache invalidate prefix");
        self.entries
            .lock()
            .await
            .retain(|key, _| !key.starts_with(prefix));
    }

    /// Drop everything. Used on logout so no cached response leaks across
    /// sessions.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

// Key builders, one per cached query. Mutation call sites invalidate with
// these same builders (or the matching `keys::*_PREFIX`) so reads observe
// fresh data.
pub mod keys {
    use super::*;

    pub const LISTINGS_PREFIX: &str = "listings:";
    pub const BOOKINGS_PREFIX: &str = "bookings:";
    pub const REVIEWS_PREFIX: &str = "reviews:";
    pub const PAYMENTS_PREFIX: &str = "payments:";

    pub fn current_user() -> String {
        "auth:me".to_string()
    }

    pub fn listing_search(params: &ListingSearch) -> String {
        // Parameters are folded into the key so distinct searches cache
        // independently, identical ones deduplicate.
        let fingerprint = serde_json::to_string(params).unwrap_or_default();
        format!("listings:list:{fingerprint}")
    }

    pub fn listing(id: i64) -> String {
        format!("listings:detail:{id}")
    }

    pub fn my_listings() -> String {
        "listings:my".to_string()
    }

    pub fn my_bookings() -> String {
        "bookings:my".to_string()
    }

    pub fn incoming_bookings() -> String {
        "bookings:incoming".to_string()
    }

    pub fn booking(id: i64) -> String {
        format!("bookings:detail:{id}")
    }

    pub fn listing_reviews(listing_id: i64) -> String {
        format!("reviews:listing:{listing_id}")
    }

    pub fn host_reviews(host_id: i64) -> String {
        format!("reviews:host:{host_id}")
    }

    pub fn my_reviews() -> String {
        "reviews:my".to_string()
    }

    pub fn payment_status(booking_id: i64) -> String {
        format!("payments:booking:{booking_id}")
    }
}
