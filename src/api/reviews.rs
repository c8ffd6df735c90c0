use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{Review, ReviewCreate, ReviewUpdate};

impl ApiClient {
    /// Leave a review. Only allowed after a completed booking; the server
    /// enforces that and the 1-5 rating range.
    pub async fn create_review(&self, review: &ReviewCreate) -> ApiResult<Review> {
        self.post_json("/reviews/", review).await
    }

    pub async fn listing_reviews(&self, listing_id: i64) -> ApiResult<Vec<Review>> {
        self.get_json::<_, ()>(&format!("/reviews/listing/{listing_id}"), None)
            .await
    }

    pub async fn host_reviews(&self, host_id: i64) -> ApiResult<Vec<Review>> {
        self.get_json::<_, ()>(&format!("/reviews/host/{host_id}"), None)
            .await
    }

    pub async fn my_reviews(&self) -> ApiResult<Vec<Review>> {
        self.get_json::<_, ()>("/reviews/my-reviews", None).await
    }

    pub async fn update_review(&self, id: i64, update: &ReviewUpdate) -> ApiResult<Review> {
        self.put_json(&format!("/reviews/{id}"), update).await
    }

    pub async fn delete_review(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/reviews/{id}")).await
    }
}
