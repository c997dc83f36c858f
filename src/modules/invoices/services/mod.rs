pub mod billing_provider;
pub mod iugu;

pub use billing_provider::BillingProvider;
pub use iugu::IuguClient;
