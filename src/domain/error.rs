use thiserror::Error;

/// Why a signature header failed the cryptographic check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureFailure {
    #[error("unable to extract timestamp and signatures from header")]
    MalformedHeader,

    #[error("timestamp {0:?} is not a unix time")]
    BadTimestamp(String),

    #[error("timestamp outside the tolerance zone")]
    OutsideTolerance,

    #[error("no signatures found matching the expected signature for payload")]
    NoMatchingSignature,
}

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("No Stripe signature found")]
    MissingSignature,

    #[error("Webhook secret not configured")]
    MisconfiguredSecret,

    #[error("Webhook Error: {0}")]
    InvalidSignature(#[from] SignatureFailure),

    #[error("Webhook Error: invalid event payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failure while turning a verified event into an order. Never reaches the
/// caller as-is; the acknowledgment policy decides what the response says.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("missing metadata field: {0}")]
    MissingMetadata(&'static str),

    #[error("persistence: {0}")]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}
