use {
    crate::domain::error::VerificationError,
    axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
    },
};

/// Everything the webhook endpoint can answer besides the acknowledgment.
/// Bodies are plain text.
#[derive(Debug)]
pub enum ApiError {
    Verification(VerificationError),
    /// Only produced under the strict acknowledgment policy.
    OrderNotPersisted,
}

impl From<VerificationError> for ApiError {
    fn from(err: VerificationError) -> Self {
        Self::Verification(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Verification(VerificationError::MisconfiguredSecret) => {
                tracing::error!("STRIPE_WEBHOOK_SECRET is not set");
                (StatusCode::INTERNAL_SERVER_ERROR, VerificationError::MisconfiguredSecret.to_string())
            }
            Self::Verification(err) => {
                tracing::warn!(error = %err, "webhook rejected");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::OrderNotPersisted => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Order could not be persisted".to_string(),
            ),
        };

        (status, message).into_response()
    }
}
