// Remote invoice client

pub mod models;
pub mod services;

pub use models::{
    CardDetails, ChargeItem, ChargeReceipt, ChargeRequest, InvoiceStatus, PaymentToken, Payer,
    PayerAddress, ProviderErrors, RemoteInvoice,
};
pub use services::{BillingProvider, IuguClient};
