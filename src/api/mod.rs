pub mod auth;
pub mod bookings;
pub mod client;
pub mod listings;
pub mod payments;
pub mod reviews;

pub use client::ApiClient;
