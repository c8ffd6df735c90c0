use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A marketplace user. The `is_host` flag only gates which operations the
/// server will accept; the client treats it as display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub is_host: bool,
    pub profile_image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    /// Initials for avatar placeholders, e.g. "Jane Doe" -> "JD".
    pub fn initials(&self) -> String {
        let first = self.first_name.chars().next();
        let last = self.last_name.chars().next();
        first
            .into_iter()
            .chain(last)
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}

/// Payload for account creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub is_host: bool,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

/// Partial profile update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Bearer token returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// A bookable property with nightly rate and capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price_per_night: f64,
    pub location: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_active: bool,
    pub host_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub host: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_per_night: f64,
    pub location: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
}

/// Partial listing update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Listing detail response: the listing plus its reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingWithReviews {
    #[serde(flatten)]
    pub listing: Listing,
    pub reviews: Vec<Review>,
    pub average_rating: Option<f64>,
}

/// Query parameters for the listing search endpoint. `amenities` is a
/// comma-separated list; the server splits it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<String>,
}

/// One image to upload, base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    pub filename: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub detail: String,
    pub images: Vec<String>,
}

/// Booking lifecycle status. Owned by the server; the client only displays
/// it and requests transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[serde(other)]
    Unknown,
}

/// Payment lifecycle status, mirrored from the payment processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Paid,
    Failed,
    Refunded,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// A reservation of a listing for a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub listing_id: i64,
    pub customer_id: i64,
    pub check_in_date: NaiveDateTime,
    pub check_out_date: NaiveDateTime,
    pub total_price: f64,
    pub guest_count: i32,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub stripe_payment_intent_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub refund_amount: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub listing: Listing,
    pub customer: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub listing_id: i64,
    pub check_in_date: NaiveDateTime,
    pub check_out_date: NaiveDateTime,
    pub guest_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

/// A guest review, created only after a completed booking (server-enforced).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub listing_id: i64,
    pub reviewer_id: i64,
    pub host_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
    pub reviewer: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub listing_id: i64,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Server-created payment intent; `client_secret` is handed to the hosted
/// payment-field SDK, never inspected here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub payment_intent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmed {
    pub detail: String,
    pub booking_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    pub booking_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundResponse {
    pub refund_id: String,
    pub status: String,
    pub amount: f64,
}

/// Per-booking payment summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingPaymentStatus {
    pub booking_id: i64,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub total_price: f64,
    pub refund_amount: f64,
    pub stripe_payment_intent_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_user_json() -> serde_json::Value {
        json!({
            "id": 7,
            "email": "host@example.com",
            "username": "host7",
            "first_name": "Jane",
            "last_name": "Doe",
            "phone": null,
            "is_host": true,
            "profile_image": null,
            "created_at": "2024-01-15T09:30:00",
            "updated_at": null
        })
    }

    #[test]
    fn deserializes_listing_with_reviews() {
        let value = json!({
            "id": 3,
            "title": "Harbour loft",
            "description": "Bright loft by the water",
            "price_per_night": 120.0,
            "location": "Lisbon",
            "address": "Rua do Ouro 12",
            "latitude": 38.71,
            "longitude": -9.14,
            "max_guests": 4,
            "bedrooms": 2,
            "bathrooms": 1,
            "amenities": ["wifi", "kitchen"],
            "images": [],
            "is_active": true,
            "host_id": 7,
            "created_at": "2024-01-15T09:30:00",
            "updated_at": null,
            "host": sample_user_json(),
            "reviews": [],
            "average_rating": null
        });

        let detail: ListingWithReviews = serde_json::from_value(value).unwrap();
        assert_eq!(detail.listing.title, "Harbour loft");
        assert_eq!(detail.listing.max_guests, 4);
        assert!(detail.reviews.is_empty());
    }

    #[test]
    fn status_enums_parse_known_and_unknown_values() {
        let status: BookingStatus = serde_json::from_value(json!("confirmed")).unwrap();
        assert_eq!(status, BookingStatus::Confirmed);

        // Server-owned enumeration: values this client has never heard of
        // must not break deserialization.
        let status: BookingStatus = serde_json::from_value(json!("on_hold")).unwrap();
        assert_eq!(status, BookingStatus::Unknown);

        let payment: PaymentStatus = serde_json::from_value(json!("refunded")).unwrap();
        assert_eq!(payment, PaymentStatus::Refunded);
    }

    #[test]
    fn status_enums_serialize_lowercase() {
        let body = serde_json::to_value(BookingStatusUpdate {
            status: BookingStatus::Cancelled,
        })
        .unwrap();
        assert_eq!(body, json!({ "status": "cancelled" }));
    }

    #[test]
    fn optional_fields_are_omitted_from_payloads() {
        let create = BookingCreate {
            listing_id: 3,
            check_in_date: "2024-06-01T00:00:00".parse().unwrap(),
            check_out_date: "2024-06-03T00:00:00".parse().unwrap(),
            guest_count: 2,
            special_requests: None,
        };
        let value = serde_json::to_value(&create).unwrap();
        assert!(value.get("special_requests").is_none());
    }

    #[test]
    fn initials_come_from_both_names() {
        let mut user: User = serde_json::from_value(sample_user_json()).unwrap();
        assert_eq!(user.initials(), "JD");
        user.last_name.clear();
        assert_eq!(user.initials(), "J");
    }

    #[test]
    fn search_params_default_to_empty() {
        let search = ListingSearch::default();
        let value = serde_json::to_value(&search).unwrap();
        assert_eq!(value, json!({}));
    }
}
