pub mod orchestrator;

pub use orchestrator::{PaymentOrchestrator, PaymentOutcome};
