use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Local payment state driven by this crate.
///
/// The host platform owns the payment record; these are the states its
/// state machine exposes to the gateway side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    /// Captured at checkout, no charge attempted yet
    Checkout,

    /// Remote invoice awaiting settlement
    Pending,

    /// Charge created, settlement in flight
    Processing,

    /// Settled
    Completed,

    /// Refunded or otherwise written off
    Void,
}

impl Default for PaymentState {
    fn default() -> Self {
        PaymentState::Checkout
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentState::Checkout => write!(f, "checkout"),
            PaymentState::Pending => write!(f, "pending"),
            PaymentState::Processing => write!(f, "processing"),
            PaymentState::Completed => write!(f, "completed"),
            PaymentState::Void => write!(f, "void"),
        }
    }
}

impl FromStr for PaymentState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "checkout" => Ok(PaymentState::Checkout),
            "pending" => Ok(PaymentState::Pending),
            "processing" => Ok(PaymentState::Processing),
            "completed" => Ok(PaymentState::Completed),
            "void" => Ok(PaymentState::Void),
            _ => Err(format!("Invalid payment state: {s}")),
        }
    }
}

/// Mirror of the host platform's payment record.
///
/// Invariant: `response_code` is set if and only if a remote charge was
/// created for this payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Host-assigned payment number
    pub number: String,

    /// Amount the host recorded for this payment
    pub amount: Decimal,

    /// Installment count the payer selected at checkout
    pub installments: Option<u32>,

    /// Remote invoice id once a charge exists
    pub response_code: Option<String>,

    pub state: PaymentState,
}

impl Payment {
    pub fn new(number: impl Into<String>, amount: Decimal, installments: Option<u32>) -> Self {
        Self {
            number: number.into(),
            amount,
            installments,
            response_code: None,
            state: PaymentState::Checkout,
        }
    }

    pub fn has_remote_charge(&self) -> bool {
        self.response_code.is_some()
    }

    /// Remote invoice still awaiting settlement.
    pub fn pend(&mut self) {
        self.state = PaymentState::Pending;
    }

    /// Charge created, settlement in flight.
    pub fn started_processing(&mut self) {
        self.state = PaymentState::Processing;
    }

    /// Remote invoice settled.
    pub fn complete(&mut self) {
        self.state = PaymentState::Completed;
    }

    /// Remote invoice refunded.
    pub fn void_payment(&mut self) {
        self.state = PaymentState::Void;
    }
}
