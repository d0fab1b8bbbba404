// --- File: crates/courtbook_services/src/payments.rs ---
use courtbook_client::{endpoints, ApiClient, ApiError, Method, ToQuery};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::{fetch_list, fetch_one, post_empty, send_json};
use crate::filters::PaymentFilter;
use crate::models::{Invoice, InvoiceDownload, Payment, PaymentIntent};

/// Payments and invoices. Card processing itself happens at the payment
/// provider; the backend only hands out intents and records outcomes.
#[derive(Debug, Clone)]
pub struct PaymentsService {
    client: Arc<ApiClient>,
}

impl PaymentsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, ApiError> {
        fetch_list(&self.client, endpoints::PAYMENTS, Some(&filter.to_query())).await
    }

    pub async fn retrieve(&self, id: u64) -> Result<Payment, ApiError> {
        fetch_one(&self.client, &endpoints::detail(endpoints::PAYMENTS, id), None).await
    }

    pub async fn create_payment_intent(&self, reservation_id: u64) -> Result<PaymentIntent, ApiError> {
        let body = json!({ "reservation_id": reservation_id });
        let intent: PaymentIntent =
            send_json(&self.client, Method::POST, endpoints::CREATE_PAYMENT_INTENT, &body).await?;
        info!(
            "Payment intent {} created for reservation {}",
            intent.payment_intent_id, reservation_id
        );
        Ok(intent)
    }

    pub async fn confirm_payment(&self, payment_intent_id: &str) -> Result<Payment, ApiError> {
        if payment_intent_id.trim().is_empty() {
            return Err(ApiError::validation("payment_intent_id is required"));
        }
        let body = json!({ "payment_intent_id": payment_intent_id });
        send_json(&self.client, Method::POST, endpoints::CONFIRM_PAYMENT, &body).await
    }

    pub async fn refund(&self, id: u64) -> Result<Payment, ApiError> {
        let endpoint = endpoints::detail_action(endpoints::PAYMENTS, id, "refund");
        let payment: Payment = post_empty(&self.client, &endpoint).await?;
        info!("Payment {} refunded", id);
        Ok(payment)
    }

    pub async fn invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        fetch_list(&self.client, endpoints::INVOICES, None).await
    }

    /// Location of the invoice PDF. A 404 means no PDF has been generated yet.
    pub async fn download_invoice(&self, id: u64) -> Result<InvoiceDownload, ApiError> {
        let endpoint = endpoints::detail_action(endpoints::INVOICES, id, "download");
        fetch_one(&self.client, &endpoint, None).await
    }
}
