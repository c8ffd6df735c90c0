use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    ImageUpload, ImageUploadResponse, Listing, ListingCreate, ListingSearch, ListingUpdate,
    ListingWithReviews,
};

impl ApiClient {
    /// Browse listings, optionally filtered.
    pub async fn search_listings(&self, params: &ListingSearch) -> ApiResult<Vec<Listing>> {
        self.get_json("/listings/", Some(params)).await
    }

    /// Listing detail, including its reviews and average rating.
    pub async fn get_listing(&self, id: i64) -> ApiResult<ListingWithReviews> {
        self.get_json::<_, ()>(&format!("/listings/{id}"), None).await
    }

    pub async fn create_listing(&self, listing: &ListingCreate) -> ApiResult<Listing> {
        self.post_json("/listings/", listing).await
    }

    pub async fn update_listing(&self, id: i64, update: &ListingUpdate) -> ApiResult<Listing> {
        self.put_json(&format!("/listings/{id}"), update).await
    }

    pub async fn delete_listing(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/listings/{id}")).await
    }

    /// Attach base64-encoded images to a listing. The server stores them
    /// and returns the resulting image URLs.
    pub async fn upload_listing_images(
        &self,
        id: i64,
        images: &[ImageUpload],
    ) -> ApiResult<ImageUploadResponse> {
        self.post_json(
            &format!("/listings/{id}/images"),
            &serde_json::json!({ "images": images }),
        )
        .await
    }

    /// Listings owned by the authenticated host.
    pub async fn my_listings(&self) -> ApiResult<Vec<Listing>> {
        self.get_json::<_, ()>("/listings/host/my-listings", None)
            .await
    }
}
