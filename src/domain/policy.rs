use {super::error::ConfigError, std::str::FromStr};

/// What the webhook answers once a signature has been verified but the
/// resulting order could not be persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AckPolicy {
    /// Always answer 200. Persistence failures are only logged, and the
    /// provider never redelivers the event.
    #[default]
    AlwaysAfterVerification,

    /// Answer 500 when the order write fails so the provider redelivers.
    /// Custom plan failures still answer 200.
    FailOnPersistenceError,
}

impl AckPolicy {
    pub fn acknowledges_failed_order(&self) -> bool {
        matches!(self, Self::AlwaysAfterVerification)
    }
}

impl FromStr for AckPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::AlwaysAfterVerification),
            "strict" => Ok(Self::FailOnPersistenceError),
            other => Err(ConfigError::Invalid {
                name: "ACK_POLICY",
                value: other.to_string(),
            }),
        }
    }
}
