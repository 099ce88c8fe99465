use {
    crate::domain::{
        error::ProjectionError,
        event::{Event, PaymentData},
        id::{CustomPlanId, EventId},
        order::{NewOrder, custom_plan_of},
        store::OrderStore,
    },
    uuid::Uuid,
};

#[derive(Debug)]
pub enum PlanUpdate {
    /// The payment carried no custom plan.
    NotRequested,
    Paid(CustomPlanId),
    /// No plan row with that id.
    NotFound(CustomPlanId),
    Failed(CustomPlanId),
}

#[derive(Debug)]
pub enum ProjectionOutcome {
    /// Event type outside the handled set.
    Ignored,
    Created { order_id: Uuid, plan: PlanUpdate },
    /// No order was written, so no custom plan was touched either.
    Failed { error: ProjectionError },
}

impl ProjectionOutcome {
    /// True when the order write itself failed in the store, as opposed to
    /// the event being unusable.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            Self::Failed {
                error: ProjectionError::Persistence(_)
            }
        )
    }
}

/// Route a verified event by its type tag. Anything other than a successful
/// payment is accepted and dropped.
pub async fn dispatch_event(store: &dyn OrderStore, event: &Event) -> ProjectionOutcome {
    let payload = match event.payload() {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "payment object did not decode");
            return ProjectionOutcome::Failed { error: e.into() };
        }
    };

    match payload.into_payment_data() {
        Some(payment) => project_payment_success(store, &payment, &event.id).await,
        None => {
            tracing::debug!(event_type = %event.event_type, "unhandled event type, ignoring");
            ProjectionOutcome::Ignored
        }
    }
}

/// Persist the order for a successful payment, then mark its custom plan
/// paid. The plan update only follows a saved order, and its failure never
/// undoes that order. Nothing here deduplicates redeliveries: the same
/// payment delivered twice yields two orders.
pub async fn project_payment_success(
    store: &dyn OrderStore,
    payment: &PaymentData,
    event_id: &EventId,
) -> ProjectionOutcome {
    tracing::info!(payment_id = %payment.id, "payment succeeded");

    let order = match NewOrder::from_payment(payment, event_id) {
        Ok(order) => store
            .create_order(&order)
            .await
            .map_err(ProjectionError::from),
        Err(e) => Err(e),
    };

    let order_id = match order {
        Ok(order_id) => {
            tracing::info!(order_id = %order_id, payment_id = %payment.id, "order created");
            order_id
        }
        Err(error) => {
            tracing::error!(payment_id = %payment.id, error = %error, "order not created, custom plan left untouched");
            return ProjectionOutcome::Failed { error };
        }
    };

    let plan = match custom_plan_of(payment) {
        None => PlanUpdate::NotRequested,
        Some(plan_id) => match store.mark_custom_plan_paid(&plan_id).await {
            Ok(true) => {
                tracing::info!(custom_plan_id = %plan_id, "custom plan marked paid");
                PlanUpdate::Paid(plan_id)
            }
            Ok(false) => {
                tracing::warn!(custom_plan_id = %plan_id, "custom plan not found");
                PlanUpdate::NotFound(plan_id)
            }
            Err(e) => {
                tracing::error!(custom_plan_id = %plan_id, error = %e, "custom plan update failed");
                PlanUpdate::Failed(plan_id)
            }
        },
    };

    ProjectionOutcome::Created { order_id, plan }
}
