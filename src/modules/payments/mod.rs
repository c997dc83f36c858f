pub mod models;
pub mod repositories;
pub mod services;

pub use models::{
    Adjustment, BillingAddress, CheckoutContext, LineItem, Order, Payment, PaymentState,
};
pub use repositories::CheckoutRepository;
pub use services::{PaymentOrchestrator, PaymentOutcome};
