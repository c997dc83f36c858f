use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One way of splitting an order total into equal payments.
///
/// Produced fresh on every calculation and never persisted. Values carry the
/// calculator's full precision; rounding for display is a caller concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentOffer {
    /// Number of installments, starting at 1
    pub count: u32,

    /// Amount charged per installment
    pub unit_value: Decimal,

    /// Amount charged over the whole plan (`unit_value * count`)
    pub total_value: Decimal,

    /// Whether the merchant's installment tax was added to the total
    pub tax_applied: bool,
}
