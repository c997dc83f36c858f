//! User-facing outcome messages and provider error translation.
//!
//! Localization of these strings is a host-platform concern; the crate emits
//! stable English messages the host may map to its own locale keys.

/// Successful charge creation (authorize outcome)
pub const CHARGE_SUCCESS: &str = "Charge accepted by the billing provider";

/// Successful capture
pub const CAPTURE_SUCCESS: &str = "Invoice captured";

/// Successful void
pub const VOID_SUCCESS: &str = "Invoice voided";

/// Successful cancel
pub const CANCEL_SUCCESS: &str = "Invoice canceled";

/// Generic failure shown when an unclassified error is caught at the boundary
pub const GATEWAY_FAILURE: &str = "The payment could not be processed";

/// Payment arrived without a selected installment count
pub const MISSING_INSTALLMENTS: &str = "No installment count was selected for this payment";

/// Payment or order could not be resolved from the checkout context
pub const CHECKOUT_NOT_FOUND: &str = "Payment or order could not be resolved for this checkout";

/// Selected installment count has no matching offer for the order total
pub const OFFER_NOT_AVAILABLE: &str =
    "The selected installment plan is not available for this order";

/// Remote charge exists but the local commit failed
pub const RECONCILIATION_GAP: &str =
    "Charge was created remotely but could not be recorded locally; manual reconciliation required";

/// Payment has no authorization reference to reconcile against
pub const MISSING_AUTHORIZATION: &str = "Payment has no authorization reference";

/// Label of the synthetic order adjustment covering installment tax
pub const INSTALLMENT_TAX_LABEL: &str = "Installment tax";

/// Label of the synthetic shipping charge item
pub const SHIPPING_LABEL: &str = "Shipping";

/// Map known field-level provider error strings to friendlier wording.
///
/// Unmapped strings pass through untouched so the payer still sees the
/// provider's own diagnosis.
pub fn translate_error(raw: &str) -> &str {
    match raw {
        "is not a valid credit card number" => "Invalid credit card number",
        other => other,
    }
}

/// Join a provider error payload into a single translated message.
pub fn translate_joined<I, S>(raw_messages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw_messages
        .into_iter()
        .map(|m| translate_error(m.as_ref()).to_string())
        .collect::<Vec<_>>()
        .join(". ")
}
