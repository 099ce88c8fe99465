use {
    rust_decimal::Decimal,
    std::{fmt, str::FromStr},
};

/// Amount in the currency's smallest unit, as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinorUnits(i64);

impl MinorUnits {
    pub fn new(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Two-decimal major units. Zero-decimal currencies are not special-cased.
    pub fn to_major(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order price: the `amount` metadata string when it parses as a plain or
/// scientific-notation decimal, otherwise the provider amount divided by 100.
/// The parsed value is kept at full precision.
pub fn resolve_price(metadata_amount: Option<&str>, fallback: MinorUnits) -> Decimal {
    match metadata_amount.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(amount = raw, error = %e, "unparseable metadata amount, using provider amount");
                fallback.to_major()
            }
        },
        None => fallback.to_major(),
    }
}
