mod card;
mod charge;
mod remote_invoice;

pub use card::{CardDetails, PaymentToken};
pub use charge::{ChargeItem, ChargeReceipt, ChargeRequest, Payer, PayerAddress};
pub use remote_invoice::{InvoiceStatus, ProviderErrors, RemoteInvoice};
