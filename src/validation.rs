//! Pure pre-submit validation. Everything here is advisory: the server
//! re-validates every payload, so these checks only exist to give the user
//! an immediate, local answer.

use chrono::{DateTime, NaiveTime, Utc};
use thiserror::Error;

/// Longest bookable span, in days.
pub const MAX_BOOKING_DAYS: i64 = 365;

const SECONDS_PER_DAY: i64 = 86_400;

/// Accepted booking quote: whole nights charged and the resulting total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingQuote {
    pub nights: i64,
    pub total_price: f64,
}

/// First booking rule violated, in evaluation order. The `Display` text is
/// what gets rendered next to the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Check-in date cannot be in the past")]
    CheckInInPast,
    #[error("Check-out date must be after check-in date")]
    CheckOutNotAfterCheckIn,
    #[error("Booking cannot exceed 365 days")]
    SpanTooLong,
    #[error("Guest count must be between 1 and {max_guests}")]
    GuestCount { max_guests: i32 },
}

/// Decide bookability and price a prospective stay.
///
/// Rules are evaluated in order and the first failure wins: check-in must
/// not precede `now`'s date, check-out must strictly follow check-in, the
/// span must not exceed [`MAX_BOOKING_DAYS`], and the guest count must be
/// between 1 and `max_guests` inclusive.
///
/// Nights are the ceiling of the span in whole days, so a stay of 1.5 days
/// is charged as 2 nights. `now` is a parameter rather than a clock read to
/// keep the function pure.
pub fn quote_booking(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    price_per_night: f64,
    max_guests: i32,
    guest_count: i32,
    now: DateTime<Utc>,
) -> Result<BookingQuote, BookingError> {
    // "Not in the past" means before midnight of the current day, so a
    // same-day check-in is always allowed.
    let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    if check_in < today {
        return Err(BookingError::CheckInInPast);
    }

    if check_out <= check_in {
        return Err(BookingError::CheckOutNotAfterCheckIn);
    }

    let span_seconds = (check_out - check_in).num_seconds();
    if span_seconds > MAX_BOOKING_DAYS * SECONDS_PER_DAY {
        return Err(BookingError::SpanTooLong);
    }

    if guest_count < 1 || guest_count > max_guests {
        return Err(BookingError::GuestCount { max_guests });
    }

    // Ceiling division; span_seconds is positive here.
    let nights = (span_seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;

    Ok(BookingQuote {
        nights,
        total_price: nights as f64 * price_per_night,
    })
}

/// Minimal email shape check: one `@`, non-empty local part, a dot in the
/// domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Password strength rule violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one number")]
    MissingDigit,
}

pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < 8 {
        return Err(PasswordError::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::MissingDigit);
    }
    Ok(())
}

/// Phone shape: optional leading `+`, then at least ten digits, spaces,
/// dashes or parentheses.
pub fn is_valid_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    rest.len() >= 10
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
}

/// Nightly rate bounds accepted by the listing form.
pub fn is_valid_price(price: f64) -> bool {
    price > 0.0 && price <= 10_000.0
}

/// One inline form error: field name plus the message rendered next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Immutable registration form state; validated as a whole on every change.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub is_host: bool,
}

pub fn validate_registration(form: &RegistrationForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(&form.email) {
        errors.push(FieldError::new("email", "Please enter a valid email address"));
    }

    if form.username.trim().is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    }
    if form.first_name.trim().is_empty() {
        errors.push(FieldError::new("first_name", "First name is required"));
    }
    if form.last_name.trim().is_empty() {
        errors.push(FieldError::new("last_name", "Last name is required"));
    }

    // Phone is optional, but must be well-formed when present.
    if !form.phone.is_empty() && !is_valid_phone(&form.phone) {
        errors.push(FieldError::new("phone", "Please enter a valid phone number"));
    }

    if form.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if let Err(err) = validate_password(&form.password) {
        errors.push(FieldError::new("password", err.to_string()));
    }

    if form.confirm_password != form.password {
        errors.push(FieldError::new("confirm_password", "Passwords do not match"));
    }

    errors
}

/// Immutable listing form state, shared by every step of the create/edit
/// wizard. Steps display subsets of the fields; validation always runs over
/// the whole struct.
#[derive(Debug, Clone, Default)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub price_per_night: Option<f64>,
    pub location: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub max_guests: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub amenities: Vec<String>,
}

pub fn validate_listing(form: &ListingForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    }
    if form.location.trim().is_empty() {
        errors.push(FieldError::new("location", "Location is required"));
    }
    if form.address.trim().is_empty() {
        errors.push(FieldError::new("address", "Address is required"));
    }

    match form.price_per_night {
        None => errors.push(FieldError::new("price_per_night", "Price is required")),
        Some(price) if price < 1.0 => {
            errors.push(FieldError::new("price_per_night", "Price must be greater than 0"))
        }
        Some(price) if price > 10_000.0 => {
            errors.push(FieldError::new("price_per_night", "Price cannot exceed $10,000"))
        }
        Some(_) => {}
    }

    match form.max_guests {
        None => errors.push(FieldError::new("max_guests", "Maximum guests is required")),
        Some(n) if n < 1 => {
            errors.push(FieldError::new("max_guests", "Must accommodate at least 1 guest"))
        }
        Some(n) if n > 20 => {
            errors.push(FieldError::new("max_guests", "Cannot exceed 20 guests"))
        }
        Some(_) => {}
    }

    if form.bedrooms.is_some_and(|n| n < 0) {
        errors.push(FieldError::new("bedrooms", "Bedrooms cannot be negative"));
    }
    if form.bathrooms.is_some_and(|n| n < 0) {
        errors.push(FieldError::new("bathrooms", "Bathrooms cannot be negative"));
    }

    // Coordinates come from the geocoding lookup and are optional; validate
    // only when the lookup filled them in.
    if form.latitude.is_some_and(|lat| !(-90.0..=90.0).contains(&lat)) {
        errors.push(FieldError::new("latitude", "Latitude must be between -90 and 90"));
    }
    if form
        .longitude
        .is_some_and(|lon| !(-180.0..=180.0).contains(&lon))
    {
        errors.push(FieldError::new("longitude", "Longitude must be between -180 and 180"));
    }

    errors
}

/// Review rating bounds (1-5 stars); the server enforces the same rule.
pub fn is_valid_rating(rating: i32) -> bool {
    (1..=5).contains(&rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    // A fixed "current" instant mid-morning on 2024-05-20.
    fn now() -> DateTime<Utc> {
        utc(2024, 5, 20, 10, 30)
    }

    #[test]
    fn rejects_check_in_before_today() {
        let result = quote_booking(
            utc(2024, 5, 19, 0, 0),
            utc(2024, 6, 1, 0, 0),
            100.0,
            4,
            2,
            now(),
        );
        assert_eq!(result, Err(BookingError::CheckInInPast));
    }

    #[test]
    fn allows_same_day_check_in() {
        // Check-in earlier in the day than `now` is still "today".
        let result = quote_booking(
            utc(2024, 5, 20, 0, 0),
            utc(2024, 5, 22, 0, 0),
            100.0,
            4,
            2,
            now(),
        );
        assert_eq!(
            result,
            Ok(BookingQuote {
                nights: 2,
                total_price: 200.0
            })
        );
    }

    #[test]
    fn rejects_check_out_equal_to_check_in() {
        let result = quote_booking(
            utc(2024, 6, 1, 0, 0),
            utc(2024, 6, 1, 0, 0),
            100.0,
            4,
            2,
            now(),
        );
        assert_eq!(result, Err(BookingError::CheckOutNotAfterCheckIn));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Check-out date must be after check-in date"
        );
    }

    #[test]
    fn rejects_check_out_before_check_in() {
        let result = quote_booking(
            utc(2024, 6, 3, 0, 0),
            utc(2024, 6, 1, 0, 0),
            100.0,
            4,
            2,
            now(),
        );
        assert_eq!(result, Err(BookingError::CheckOutNotAfterCheckIn));
    }

    #[test]
    fn past_check_in_wins_over_bad_check_out() {
        // Both rules are violated; the first one in evaluation order is
        // the reason reported.
        let result = quote_booking(
            utc(2024, 5, 1, 0, 0),
            utc(2024, 4, 1, 0, 0),
            100.0,
            4,
            2,
            now(),
        );
        assert_eq!(result, Err(BookingError::CheckInInPast));
    }

    #[test]
    fn two_night_stay_is_priced_exactly() {
        let result = quote_booking(
            utc(2024, 6, 1, 0, 0),
            utc(2024, 6, 3, 0, 0),
            100.0,
            4,
            2,
            now(),
        );
        assert_eq!(
            result,
            Ok(BookingQuote {
                nights: 2,
                total_price: 200.0
            })
        );
    }

    #[test]
    fn partial_days_round_up() {
        // One and a half days is charged as two nights.
        let result = quote_booking(
            utc(2024, 6, 1, 0, 0),
            utc(2024, 6, 2, 12, 0),
            100.0,
            4,
            2,
            now(),
        )
        .unwrap();
        assert_eq!(result.nights, 2);
        assert_eq!(result.total_price, 200.0);
    }

    #[test]
    fn a_few_hours_still_cost_one_night() {
        let result = quote_booking(
            utc(2024, 6, 1, 14, 0),
            utc(2024, 6, 1, 20, 0),
            80.0,
            4,
            2,
            now(),
        )
        .unwrap();
        assert_eq!(result.nights, 1);
        assert_eq!(result.total_price, 80.0);
    }

    #[test]
    fn rejects_span_over_a_year() {
        let result = quote_booking(
            utc(2024, 6, 1, 0, 0),
            utc(2025, 7, 6, 0, 0), // 400 days
            100.0,
            4,
            2,
            now(),
        );
        assert_eq!(result, Err(BookingError::SpanTooLong));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Booking cannot exceed 365 days"
        );
    }

    #[test]
    fn accepts_exactly_365_days() {
        let result = quote_booking(
            utc(2024, 6, 1, 0, 0),
            utc(2025, 6, 1, 0, 0),
            10.0,
            4,
            2,
            now(),
        )
        .unwrap();
        assert_eq!(result.nights, 365);
        assert_eq!(result.total_price, 3650.0);
    }

    #[test]
    fn rejects_guest_count_outside_bounds() {
        for guests in [0, -1, 5] {
            let result = quote_booking(
                utc(2024, 6, 1, 0, 0),
                utc(2024, 6, 3, 0, 0),
                100.0,
                4,
                guests,
                now(),
            );
            assert_eq!(result, Err(BookingError::GuestCount { max_guests: 4 }));
        }
    }

    #[test]
    fn guest_rule_applies_even_with_valid_dates() {
        let result = quote_booking(
            utc(2024, 6, 1, 0, 0),
            utc(2024, 6, 10, 0, 0),
            100.0,
            4,
            5,
            now(),
        );
        assert_eq!(result, Err(BookingError::GuestCount { max_guests: 4 }));
    }

    #[test]
    fn quote_is_idempotent() {
        let run = || {
            quote_booking(
                utc(2024, 6, 1, 0, 0),
                utc(2024, 6, 4, 18, 0),
                99.5,
                6,
                3,
                now(),
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("guest@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co"));
        assert!(!is_valid_email("guest@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("guest example@site.com"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
    }

    #[test]
    fn password_rules_in_order() {
        assert_eq!(validate_password("Ab1"), Err(PasswordError::TooShort));
        assert_eq!(
            validate_password("ABCDEFG1"),
            Err(PasswordError::MissingLowercase)
        );
        assert_eq!(
            validate_password("abcdefg1"),
            Err(PasswordError::MissingUppercase)
        );
        assert_eq!(
            validate_password("Abcdefgh"),
            Err(PasswordError::MissingDigit)
        );
        assert_eq!(validate_password("Abcdefg1"), Ok(()));
    }

    #[test]
    fn phone_shapes() {
        assert!(is_valid_phone("+46 70 123 45 67"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me maybe"));
    }

    #[test]
    fn price_bounds() {
        assert!(is_valid_price(50.0));
        assert!(is_valid_price(10_000.0));
        assert!(!is_valid_price(0.0));
        assert!(!is_valid_price(-10.0));
        assert!(!is_valid_price(10_000.01));
    }

    #[test]
    fn registration_form_reports_each_bad_field() {
        let form = RegistrationForm {
            email: "not-an-email".into(),
            username: "guest".into(),
            first_name: "".into(),
            last_name: "Doe".into(),
            phone: "123".into(),
            password: "Abcdefg1".into(),
            confirm_password: "different".into(),
            is_host: false,
        };
        let errors = validate_registration(&form);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["email", "first_name", "phone", "confirm_password"]
        );
    }

    #[test]
    fn valid_registration_form_passes() {
        let form = RegistrationForm {
            email: "guest@example.com".into(),
            username: "guest".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            phone: String::new(),
            password: "Abcdefg1".into(),
            confirm_password: "Abcdefg1".into(),
            is_host: false,
        };
        assert!(validate_registration(&form).is_empty());
    }

    #[test]
    fn listing_form_requires_core_fields() {
        let errors = validate_listing(&ListingForm::default());
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["title", "location", "address", "price_per_night", "max_guests"]
        );
    }

    #[test]
    fn listing_form_checks_coordinates_only_when_present() {
        let mut form = ListingForm {
            title: "Harbour loft".into(),
            location: "Lisbon".into(),
            address: "Rua do Ouro 12".into(),
            price_per_night: Some(120.0),
            max_guests: Some(4),
            ..ListingForm::default()
        };
        assert!(validate_listing(&form).is_empty());

        form.latitude = Some(123.0);
        let errors = validate_listing(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "latitude");
    }

    #[test]
    fn listing_form_rejects_out_of_range_values() {
        let form = ListingForm {
            title: "Harbour loft".into(),
            location: "Lisbon".into(),
            address: "Rua do Ouro 12".into(),
            price_per_night: Some(20_000.0),
            max_guests: Some(40),
            bedrooms: Some(-1),
            ..ListingForm::default()
        };
        let fields: Vec<_> = validate_listing(&form)
            .iter()
            .map(|e| e.field)
            .collect::<Vec<_>>();
        assert_eq!(fields, vec!["price_per_night", "max_guests", "bedrooms"]);
    }

    #[test]
    fn rating_bounds() {
        assert!(is_valid_rating(1));
        assert!(is_valid_rating(5));
        assert!(!is_valid_rating(0));
        assert!(!is_valid_rating(6));
    }
}
