use {
    super::{
        id::{EventId, ProviderPaymentId},
        money::MinorUnits,
    },
    derive_more::Display,
    serde::Deserialize,
    std::collections::HashMap,
};

/// Verified provider event envelope.
#[derive(Debug, Clone, Deserialize, Display)]
#[display("{id} ({event_type})")]
pub struct Event {
    pub id: EventId,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub livemode: bool,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    /// Decoded lazily, per event type, by [`Event::payload`].
    pub object: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EventType {
    #[display("payment_intent.succeeded")]
    PaymentIntentSucceeded,

    #[display("charge.succeeded")]
    ChargeSucceeded,

    #[display("unhandled")]
    Unhandled,
}

impl EventType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "payment_intent.succeeded" => Self::PaymentIntentSucceeded,
            "charge.succeeded" => Self::ChargeSucceeded,
            _ => Self::Unhandled,
        }
    }
}

/// String-to-string metadata attached when the payment was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Metadata(HashMap<String, String>);

impl Metadata {
    /// Present and non-empty value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntentObject {
    pub id: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChargeObject {
    pub id: String,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone)]
pub enum EventPayload {
    PaymentIntentSucceeded(PaymentIntentObject),
    ChargeSucceeded(ChargeObject),
    Unhandled,
}

impl Event {
    pub fn kind(&self) -> EventType {
        EventType::from_tag(&self.event_type)
    }

    /// Decode `data.object` according to the type tag. Unhandled types are
    /// not decoded at all.
    pub fn payload(&self) -> Result<EventPayload, serde_json::Error> {
        Ok(match self.kind() {
            EventType::PaymentIntentSucceeded => EventPayload::PaymentIntentSucceeded(
                PaymentIntentObject::deserialize(&self.data.object)?,
            ),
            EventType::ChargeSucceeded => {
                EventPayload::ChargeSucceeded(ChargeObject::deserialize(&self.data.object)?)
            }
            EventType::Unhandled => EventPayload::Unhandled,
        })
    }
}

/// Canonical view of a successful payment, whichever object carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentData {
    pub id: ProviderPaymentId,
    pub metadata: Metadata,
    pub amount: MinorUnits,
}

impl EventPayload {
    pub fn into_payment_data(self) -> Option<PaymentData> {
        match self {
            Self::PaymentIntentSucceeded(pi) => Some(PaymentData {
                id: ProviderPaymentId::new(pi.id),
                metadata: pi.metadata,
                amount: MinorUnits::new(pi.amount),
            }),
            Self::ChargeSucceeded(charge) => {
                let id = match charge.payment_intent {
                    Some(pi) if !pi.is_empty() => pi,
                    _ => {
                        tracing::warn!(charge_id = %charge.id, "charge has no payment intent, correlating by charge id");
                        charge.id
                    }
                };
                Some(PaymentData {
                    id: ProviderPaymentId::new(id),
                    metadata: charge.metadata,
                    amount: MinorUnits::new(charge.amount),
                })
            }
            Self::Unhandled => None,
        }
    }
}
