use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{Booking, BookingCreate, BookingStatus, BookingStatusUpdate};

impl ApiClient {
    /// Reserve a listing. Availability and price are re-checked by the
    /// server; the local quote is advisory only.
    pub async fn create_booking(&self, booking: &BookingCreate) -> ApiResult<Booking> {
        self.post_json("/bookings/", booking).await
    }

    /// Bookings made by the authenticated customer.
    pub async fn my_bookings(&self) -> ApiResult<Vec<Booking>> {
        self.get_json::<_, ()>("/bookings/my-bookings", None).await
    }

    /// Bookings received on the authenticated host's listings.
    pub async fn incoming_bookings(&self) -> ApiResult<Vec<Booking>> {
        self.get_json::<_, ()>("/bookings/host/incoming", None).await
    }

    pub async fn get_booking(&self, id: i64) -> ApiResult<Booking> {
        self.get_json::<_, ()>(&format!("/bookings/{id}"), None).await
    }

    /// Request a lifecycle transition (confirm, complete, ...). Whether the
    /// transition is legal is the server's call.
    pub async fn update_booking_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> ApiResult<Booking> {
        self.put_json(
            &format!("/bookings/{id}/status"),
            &BookingStatusUpdate { status },
        )
        .await
    }

    pub async fn cancel_booking(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/bookings/{id}")).await
    }
}
