use {
    super::{
        error::ProjectionError,
        event::PaymentData,
        id::{CustomPlanId, EventId, ProviderPaymentId},
        money::resolve_price,
    },
    rust_decimal::Decimal,
    std::fmt,
    uuid::Uuid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Succeeded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Orders are only ever created in their terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomPlanPaymentStatus {
    Paid,
}

impl CustomPlanPaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
        }
    }
}

/// For INSERT, id generated in Rust via Uuid::now_v7().
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    id: Uuid,
    user_id: String,
    service_id: Option<String>,
    plan_id: Option<String>,
    price: Decimal,
    description: String,
    provider_payment_id: ProviderPaymentId,
    provider_event_id: EventId,
    payment_status: PaymentStatus,
    status: OrderStatus,
    plan_name: Option<String>,
    service_name: Option<String>,
    plan_description: Option<String>,
}

impl NewOrder {
    /// Build the order for a successful payment. Only `userId` is mandatory;
    /// everything else in the metadata is optional.
    pub fn from_payment(
        payment: &PaymentData,
        event_id: &EventId,
    ) -> Result<Self, ProjectionError> {
        let meta = &payment.metadata;
        let owned = |key: &str| meta.get(key).map(str::to_string);

        let user_id = owned("userId").ok_or(ProjectionError::MissingMetadata("userId"))?;
        let plan_name = owned("planName");
        let service_name = owned("serviceName");

        let description = format!(
            "Payment for {} under {}",
            plan_name.as_deref().unwrap_or_default(),
            service_name.as_deref().unwrap_or_default(),
        );

        Ok(Self {
            id: Uuid::now_v7(),
            user_id,
            service_id: owned("serviceId"),
            plan_id: owned("planId"),
            price: resolve_price(meta.get("amount"), payment.amount),
            description,
            provider_payment_id: payment.id.clone(),
            provider_event_id: event_id.clone(),
            payment_status: PaymentStatus::Succeeded,
            status: OrderStatus::Completed,
            plan_name,
            service_name,
            plan_description: owned("planDescription"),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn service_id(&self) -> Option<&str> {
        self.service_id.as_deref()
    }

    pub fn plan_id(&self) -> Option<&str> {
        self.plan_id.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn provider_payment_id(&self) -> &ProviderPaymentId {
        &self.provider_payment_id
    }

    pub fn provider_event_id(&self) -> &EventId {
        &self.provider_event_id
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn plan_name(&self) -> Option<&str> {
        self.plan_name.as_deref()
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    pub fn plan_description(&self) -> Option<&str> {
        self.plan_description.as_deref()
    }
}

/// The plan to flip to paid, if the payment carried one.
pub fn custom_plan_of(payment: &PaymentData) -> Option<CustomPlanId> {
    payment.metadata.get("customPlanId").and_then(CustomPlanId::new)
}
