pub mod signature;
pub mod webhook;

pub use signature::{SIGNATURE_HEADER, WebhookBody, WebhookVerifier, sign_payload};
pub use webhook::wh_handler;
