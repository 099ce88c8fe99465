use {
    order_sync::{
        adapters::stripe::{
            WebhookVerifier, sign_payload,
            signature::{DEFAULT_TOLERANCE_SECS, verify_signature},
        },
        domain::error::{SignatureFailure, VerificationError},
    },
    proptest::prelude::*,
};

fn arb_secret() -> impl Strategy<Value = String> {
    "whsec_[A-Za-z0-9]{1,48}"
}

fn arb_envelope() -> impl Strategy<Value = String> {
    ("evt_[A-Za-z0-9]{1,24}", "[a-z_]{1,16}\\.[a-z_]{1,16}", any::<i64>()).prop_map(
        |(id, event_type, amount)| {
            serde_json::json!({
                "id": id,
                "type": event_type,
                "data": {"object": {"amount": amount}},
            })
            .to_string()
        },
    )
}

proptest! {
    /// Anything the signer produces verifies, and decodes to the same event.
    #[test]
    fn signed_envelopes_verify(
        secret in arb_secret(),
        body in arb_envelope(),
        ts in 1_000_000_000i64..2_000_000_000,
        skew in -DEFAULT_TOLERANCE_SECS..=DEFAULT_TOLERANCE_SECS,
    ) {
        let header = sign_payload(body.as_bytes(), &secret, ts);
        let verifier = WebhookVerifier::new(Some(&secret), DEFAULT_TOLERANCE_SECS);
        let event = verifier.verify_at(body.as_bytes(), Some(&header), ts + skew);
        prop_assert!(event.is_ok(), "{event:?}");

        let raw: serde_json::Value = serde_json::from_str(&body).unwrap();
        let event = event.unwrap();
        prop_assert_eq!(event.id.as_str(), raw["id"].as_str().unwrap());
        prop_assert_eq!(event.event_type.as_str(), raw["type"].as_str().unwrap());
    }

    /// The MAC covers arbitrary bytes, not only JSON.
    #[test]
    fn signature_holds_for_any_bytes(
        secret in arb_secret(),
        payload in prop::collection::vec(any::<u8>(), 0..512),
        ts in 0i64..2_000_000_000,
    ) {
        let header = sign_payload(&payload, &secret, ts);
        prop_assert!(verify_signature(&payload, &header, &secret, 0, ts).is_ok());
    }

    /// Changing any single byte breaks the signature.
    #[test]
    fn flipped_byte_fails(
        secret in arb_secret(),
        payload in prop::collection::vec(any::<u8>(), 1..512),
        idx in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let header = sign_payload(&payload, &secret, 1_000);
        let mut tampered = payload.clone();
        let i = idx.index(tampered.len());
        tampered[i] ^= flip;

        prop_assert_eq!(
            verify_signature(&tampered, &header, &secret, 0, 1_000),
            Err(SignatureFailure::NoMatchingSignature)
        );
    }

    /// A different secret never verifies.
    #[test]
    fn other_secret_fails(a in arb_secret(), b in arb_secret(), body in arb_envelope()) {
        prop_assume!(a != b);
        let header = sign_payload(body.as_bytes(), &a, 1_000);
        let verifier = WebhookVerifier::new(Some(&b), 0);
        let result = verifier.verify_at(body.as_bytes(), Some(&header), 1_000);
        prop_assert!(
            matches!(
                result,
                Err(VerificationError::InvalidSignature(SignatureFailure::NoMatchingSignature))
            ),
            "{result:?}"
        );
    }
}
