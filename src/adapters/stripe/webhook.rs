use {
    super::signature::SIGNATURE_HEADER,
    crate::{AppState, adapters::api_errors::ApiError, services::projector::dispatch_event},
    axum::{Json, body::Bytes, extract::State, http::HeaderMap},
};

#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(event_id = tracing::field::Empty, event_type = tracing::field::Empty)
)]
pub async fn wh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    // A header that is not valid ASCII is present but can never verify.
    let sig = headers
        .get(SIGNATURE_HEADER)
        .map(|v| v.to_str().unwrap_or_default());

    let event = state.verifier.verify(&body, sig)?;

    tracing::Span::current()
        .record("event_id", tracing::field::display(&event.id))
        .record("event_type", tracing::field::display(&event.event_type));
    tracing::debug!(livemode = event.livemode, "signature verified");

    let outcome = dispatch_event(state.store.as_ref(), &event).await;

    if outcome.is_persistence_failure() && !state.ack_policy.acknowledges_failed_order() {
        return Err(ApiError::OrderNotPersisted);
    }

    Ok(Json(serde_json::json!({"received": true})))
}
