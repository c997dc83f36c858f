pub mod models;
pub mod services;

pub use models::InstallmentOffer;
pub use services::OfferCalculator;
