pub mod error;
pub mod messages;

pub use error::{GatewayError, Result};
