pub mod checkout_repository;

pub use checkout_repository::CheckoutRepository;
