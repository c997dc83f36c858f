pub mod controllers;

pub use controllers::{WebhookController, WebhookEvent};
