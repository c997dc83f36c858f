mod installment_offer;

pub use installment_offer::InstallmentOffer;
