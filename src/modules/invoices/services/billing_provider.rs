use async_trait::async_trait;

use crate::core::Result;
use crate::modules::invoices::models::{
    CardDetails, ChargeReceipt, ChargeRequest, PaymentToken, RemoteInvoice,
};

/// Port to the billing provider's HTTP API.
///
/// Implementations normalize provider-side rejections into
/// `GatewayError::Token` / `GatewayError::Charge` with translated messages;
/// transport and decoding failures surface as their own variants. No
/// operation retries — callers re-read idempotent state at a higher layer.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Exchange card data for an opaque provider token.
    async fn create_token(&self, card: &CardDetails) -> Result<PaymentToken>;

    /// Create a charge; the receipt carries the invoice id used for every
    /// later capture/refund/cancel/reconciliation call.
    async fn create_charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt>;

    /// Fetch the current invoice representation.
    async fn fetch_invoice(&self, invoice_id: &str) -> Result<RemoteInvoice>;

    /// Ask the provider to settle an authorized invoice. Capturing an
    /// already-paid invoice is a provider-side no-op.
    async fn capture_invoice(&self, invoice_id: &str) -> Result<RemoteInvoice>;

    /// Return a settled invoice's funds.
    async fn refund_invoice(&self, invoice_id: &str) -> Result<RemoteInvoice>;

    /// Cancel an unsettled invoice.
    async fn cancel_invoice(&self, invoice_id: &str) -> Result<RemoteInvoice>;
}
