use serde::{Deserialize, Serialize};

/// Billing address captured at checkout, in the host platform's field
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub name: String,
    pub phone: String,
    pub address1: String,
    pub city: String,
    pub state_name: String,
    pub country: String,
    pub zipcode: String,
}

/// Checkout context the host passes into gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutContext {
    pub order_number: String,
    pub payment_number: String,

    /// Email the invoice is issued against
    pub email: String,

    /// Email recorded on the payer block
    pub customer_email: String,

    pub billing_address: BillingAddress,
}

impl CheckoutContext {
    /// Split the host's composite `<order>-<payment>` reference.
    ///
    /// Host order numbers never contain a dash, so the first dash is the
    /// separator.
    pub fn split_reference(reference: &str) -> Option<(&str, &str)> {
        reference.split_once('-')
    }
}
