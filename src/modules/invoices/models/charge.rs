use serde::{Deserialize, Serialize};

/// One billable line on a charge request. Amounts travel in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeItem {
    pub description: String,
    pub quantity: u32,
    pub price_cents: i64,
}

/// Payer address block in the provider's field layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

/// Payer identification attached to a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_prefix: Option<String>,

    pub phone: String,
    pub email: String,
    pub address: PayerAddress,
}

impl Payer {
    /// Build a payer, decomposing the raw phone string into the provider's
    /// prefix + local-number fields.
    pub fn new(name: String, raw_phone: &str, email: String, address: PayerAddress) -> Self {
        let (phone_prefix, phone) = split_phone(raw_phone);
        Self {
            name,
            phone_prefix,
            phone,
            email,
            address,
        }
    }
}

/// Extract an area prefix from phone strings shaped like `(NN) NNNNN-NNNN`.
///
/// The prefix is only taken when a parenthesis is present, from the fixed
/// offsets that shape implies; any slice that misses the string falls back
/// to the whole input as local number with no prefix. Best-effort on
/// purpose: the provider expects this exact decomposition and rejects
/// nothing over it.
fn split_phone(raw: &str) -> (Option<String>, String) {
    if !raw.contains('(') {
        return (None, raw.to_string());
    }

    match (raw.get(1..3), raw.get(5..)) {
        (Some(prefix), Some(local)) => (Some(prefix.to_string()), local.to_string()),
        _ => (None, raw.to_string()),
    }
}

/// Fully assembled charge request for the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Token minted from the card data
    pub token: String,

    /// Checkout email the invoice is issued against
    pub email: String,

    /// Selected installment count
    pub months: u32,

    pub items: Vec<ChargeItem>,

    /// Webhook URL the provider notifies on status changes
    pub notification_url: String,

    pub payer: Payer,
}

/// Successful charge creation, identified by the provider's invoice id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeReceipt {
    pub invoice_id: String,
}
