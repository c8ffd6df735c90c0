//! Payment orchestration. All non-trivial work (card tokenization, PCI,
//! the charge/refund state machine) lives in the external processor; this
//! client only sequences create-intent, confirm, and refund calls.

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{
    BookingPaymentStatus, PaymentConfirmation, PaymentConfirmed, PaymentIntentResponse,
    RefundRequest, RefundResponse,
};

impl ApiClient {
    /// Step 1 of a charge: ask the server for a payment intent. The
    /// returned client secret is handed to the hosted payment-field SDK.
    pub async fn create_payment_intent(
        &self,
        booking_id: i64,
    ) -> ApiResult<PaymentIntentResponse> {
        self.post_json(
            "/payments/create-payment-intent",
            &serde_json::json!({ "booking_id": booking_id }),
        )
        .await
    }

    /// Step 3: tell the server the SDK finished, so it reconciles the
    /// booking's payment status.
    pub async fn confirm_payment(
        &self,
        confirmation: &PaymentConfirmation,
    ) -> ApiResult<PaymentConfirmed> {
        self.post_json("/payments/confirm-payment", confirmation).await
    }

    pub async fn create_refund(&self, refund: &RefundRequest) -> ApiResult<RefundResponse> {
        self.post_json("/payments/refund", refund).await
    }

    pub async fn payment_status(&self, booking_id: i64) -> ApiResult<BookingPaymentStatus> {
        self.get_json::<_, ()>(&format!("/payments/booking/{booking_id}/payment-status"), None)
            .await
    }
}
