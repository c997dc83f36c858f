use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::messages;

/// Remote invoice status lifecycle as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Invoice created, awaiting payment confirmation
    Pending,

    /// Payment settled
    Paid,

    /// Held by the provider's risk analysis
    InAnalysis,

    /// Invoice canceled before settlement
    Canceled,

    /// Settled amount returned in full
    Refunded,

    /// Settled amount partially returned
    PartiallyRefunded,

    /// Any status string this integration does not track
    #[serde(other)]
    Unknown,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Unknown
    }
}

impl InvoiceStatus {
    /// Parse a provider status string, mapping unrecognized values to
    /// `Unknown` rather than failing.
    pub fn from_provider(raw: &str) -> Self {
        match raw {
            "pending" => InvoiceStatus::Pending,
            "paid" => InvoiceStatus::Paid,
            "in_analysis" => InvoiceStatus::InAnalysis,
            "canceled" => InvoiceStatus::Canceled,
            "refunded" => InvoiceStatus::Refunded,
            "partially_refunded" => InvoiceStatus::PartiallyRefunded,
            _ => InvoiceStatus::Unknown,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::InAnalysis => write!(f, "in_analysis"),
            InvoiceStatus::Canceled => write!(f, "canceled"),
            InvoiceStatus::Refunded => write!(f, "refunded"),
            InvoiceStatus::PartiallyRefunded => write!(f, "partially_refunded"),
            InvoiceStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Provider error payloads arrive in three shapes: a flat string, a list of
/// strings, or a field → messages map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderErrors {
    Flat(String),
    List(Vec<String>),
    Fields(BTreeMap<String, Vec<String>>),
}

impl ProviderErrors {
    /// Flatten the payload into its individual messages.
    pub fn raw_messages(&self) -> Vec<String> {
        match self {
            ProviderErrors::Flat(message) => vec![message.clone()],
            ProviderErrors::List(list) => list.clone(),
            ProviderErrors::Fields(fields) => fields.values().flatten().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ProviderErrors::Flat(message) => message.is_empty(),
            ProviderErrors::List(list) => list.iter().all(|m| m.is_empty()),
            ProviderErrors::Fields(fields) => fields.values().all(|m| m.is_empty()),
        }
    }

    /// Single translated message suitable for a normalized failure outcome.
    pub fn to_message(&self) -> String {
        messages::translate_joined(self.raw_messages())
    }
}

/// Normalized view of the provider's invoice representation.
///
/// The local system holds only the id and last-known status; the invoice is
/// fetched, never mutated except through provider-confirmed transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteInvoice {
    /// Empty when the provider answered with a bare error payload
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub status: InvoiceStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ProviderErrors>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RemoteInvoice {
    /// Translated error detail, if the provider attached any.
    pub fn error_message(&self) -> Option<String> {
        self.errors
            .as_ref()
            .filter(|errors| !errors.is_empty())
            .map(ProviderErrors::to_message)
    }
}
