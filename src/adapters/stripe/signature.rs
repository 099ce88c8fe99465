//! Stripe webhook signature verification.
//!
//! The `Stripe-Signature` header looks like `t=1492774577,v1=5257a8...,v0=...`.
//! The signed payload is `"{t}."` followed by the request body bytes, and each
//! `v1` entry is a hex HMAC-SHA256 of it under the endpoint secret. Several
//! `v1` entries appear while a secret is being rolled.

use {
    crate::domain::{
        error::{SignatureFailure, VerificationError},
        event::Event,
    },
    axum::body::Bytes,
    hmac::{Hmac, Mac},
    sha2::Sha256,
    std::{borrow::Cow, sync::Arc},
    subtle::ConstantTimeEq,
};

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Default accepted distance between the signed timestamp and now.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, SignatureFailure> {
        let mut timestamp = None;
        let mut signatures = Vec::new();
        let mut saw_v1 = false;

        for (key, value) in header
            .split(',')
            .filter_map(|part| part.split_once('='))
            .map(|(k, v)| (k.trim(), v.trim()))
        {
            match key {
                "t" => {
                    let ts = value
                        .parse::<i64>()
                        .map_err(|_| SignatureFailure::BadTimestamp(value.to_string()))?;
                    timestamp = Some(ts);
                }
                "v1" => {
                    saw_v1 = true;
                    // Undecodable entries can never match; skip them.
                    if let Ok(sig) = hex::decode(value) {
                        signatures.push(sig);
                    }
                }
                _ => {}
            }
        }

        match timestamp {
            Some(timestamp) if saw_v1 => Ok(Self {
                timestamp,
                signatures,
            }),
            _ => Err(SignatureFailure::MalformedHeader),
        }
    }
}

fn compute_signature(payload: &[u8], secret: &str, timestamp: i64) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Build a header value that verifies `payload` under `secret`.
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let sig = compute_signature(payload, secret, timestamp);
    format!("t={timestamp},v1={}", hex::encode(sig))
}

/// Check `payload` against a raw header value. A `tolerance_secs` of zero
/// or less disables the timestamp check.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), SignatureFailure> {
    let header = SignatureHeader::parse(header)?;
    let expected = compute_signature(payload, secret, header.timestamp);

    let matched = header
        .signatures
        .iter()
        .fold(false, |acc, sig| acc | bool::from(expected.as_slice().ct_eq(sig)));
    if !matched {
        return Err(SignatureFailure::NoMatchingSignature);
    }

    if tolerance_secs > 0 && now.abs_diff(header.timestamp) > tolerance_secs.unsigned_abs() {
        return Err(SignatureFailure::OutsideTolerance);
    }

    Ok(())
}

/// Request body as handed to the verifier.
#[derive(Debug, Clone)]
pub enum WebhookBody {
    /// Bytes exactly as read from the socket.
    Raw(Bytes),
    /// Body already decoded by an upstream layer. It is re-encoded before
    /// verification, which breaks the signature whenever re-encoding changes
    /// key order, whitespace or number formatting.
    Parsed(serde_json::Value),
}

impl WebhookBody {
    pub fn signed_bytes(&self) -> Result<Cow<'_, [u8]>, serde_json::Error> {
        match self {
            Self::Raw(bytes) => Ok(Cow::Borrowed(bytes.as_ref())),
            Self::Parsed(value) => {
                tracing::warn!("body was already parsed, re-encoding for signature check");
                serde_json::to_vec(value).map(Cow::Owned)
            }
        }
    }
}

/// Endpoint secret plus tolerance. Cheap to clone.
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    secret: Option<Arc<str>>,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    /// `None` (or an empty secret) leaves the verifier misconfigured: every
    /// request fails with [`VerificationError::MisconfiguredSecret`].
    pub fn new(secret: Option<&str>, tolerance_secs: i64) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()).map(Arc::from),
            tolerance_secs,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    pub fn verify(&self, payload: &[u8], header: Option<&str>) -> Result<Event, VerificationError> {
        self.verify_at(payload, header, chrono::Utc::now().timestamp())
    }

    pub fn verify_at(
        &self,
        payload: &[u8],
        header: Option<&str>,
        now: i64,
    ) -> Result<Event, VerificationError> {
        let header = header.ok_or(VerificationError::MissingSignature)?;
        let secret = self
            .secret
            .as_deref()
            .ok_or(VerificationError::MisconfiguredSecret)?;

        verify_signature(payload, header, secret, self.tolerance_secs, now)?;
        Ok(serde_json::from_slice(payload)?)
    }

    pub fn verify_body(
        &self,
        body: &WebhookBody,
        header: Option<&str>,
    ) -> Result<Event, VerificationError> {
        // Header and secret are checked before any re-encoding happens.
        let header = header.ok_or(VerificationError::MissingSignature)?;
        if self.secret.is_none() {
            return Err(VerificationError::MisconfiguredSecret);
        }
        let bytes = body.signed_bytes()?;
        self.verify(&bytes, Some(header))
    }
}
