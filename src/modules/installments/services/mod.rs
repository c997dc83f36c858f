pub mod offer_calculator;

pub use offer_calculator::OfferCalculator;
