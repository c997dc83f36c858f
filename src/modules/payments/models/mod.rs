mod context;
mod order;
mod payment;

pub use context::{BillingAddress, CheckoutContext};
pub use order::{Adjustment, LineItem, Order};
pub use payment::{Payment, PaymentState};
