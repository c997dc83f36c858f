use async_trait::async_trait;

use crate::core::Result;
use crate::modules::payments::models::{CheckoutContext, Order, Payment};

/// Port to the host platform's order/payment storage.
///
/// The crate stages all local mutations on in-memory mirrors and persists
/// them through these calls; the host decides how they map onto its own
/// models and transactions.
#[async_trait]
pub trait CheckoutRepository: Send + Sync {
    /// Resolve the payment and order a checkout context refers to.
    async fn find_checkout(&self, context: &CheckoutContext) -> Result<Option<(Payment, Order)>>;

    /// Resolve a payment by the remote invoice id stored on it.
    async fn find_payment_by_response_code(&self, response_code: &str)
        -> Result<Option<Payment>>;

    /// Persist the authorized order and payment as one atomic unit.
    ///
    /// The order may carry a freshly staged installment-tax adjustment;
    /// either everything lands or nothing does. A failure after the remote
    /// charge was created is a reconciliation gap, and the caller reports
    /// it as such.
    async fn commit_authorization(&self, order: &Order, payment: &Payment) -> Result<()>;

    /// Persist a payment whose state was reconciled against the remote
    /// invoice.
    async fn save_payment(&self, payment: &Payment) -> Result<()>;
}
