use serde::{Deserialize, Serialize};

/// Card data captured by the checkout form, held only long enough to
/// exchange for a provider token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub verification_value: String,

    /// Holder name as printed on the card
    pub holder_name: String,

    pub month: u8,
    pub year: u16,
}

impl CardDetails {
    /// First name: everything before the first whitespace boundary.
    pub fn holder_first_name(&self) -> &str {
        self.holder_name
            .split_whitespace()
            .next()
            .unwrap_or_default()
    }

    /// Last name: the remainder, joined. A single-token name yields an
    /// empty last name.
    pub fn holder_last_name(&self) -> String {
        self.holder_name
            .split_whitespace()
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Opaque provider token standing in for the card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentToken {
    pub id: String,
}
