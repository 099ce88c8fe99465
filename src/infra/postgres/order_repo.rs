use {
    crate::domain::{
        error::PersistenceError,
        id::CustomPlanId,
        order::{CustomPlanPaymentStatus, NewOrder},
        store::{OrderStore, StoreFuture},
    },
    sqlx::PgPool,
    uuid::Uuid,
};

#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Plain insert. `provider_payment_id` carries no unique constraint, so
    /// redeliveries insert again.
    pub async fn insert_order(&self, order: &NewOrder) -> Result<Uuid, PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO orders
                (id, user_id, service_id, plan_id, price, description,
                 provider_payment_id, provider_event_id, payment_status, status,
                 plan_name, service_name, plan_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(order.id())
        .bind(order.user_id())
        .bind(order.service_id())
        .bind(order.plan_id())
        .bind(order.price())
        .bind(order.description())
        .bind(order.provider_payment_id().as_str())
        .bind(order.provider_event_id().as_str())
        .bind(order.payment_status().as_str())
        .bind(order.status().as_str())
        .bind(order.plan_name())
        .bind(order.service_name())
        .bind(order.plan_description())
        .execute(&self.pool)
        .await?;

        Ok(order.id())
    }

    /// Returns `true` if a plan row matched. Postgres counts matched rows, so
    /// a plan that is already paid still reports `true`.
    pub async fn set_custom_plan_paid(&self, id: &CustomPlanId) -> Result<bool, PersistenceError> {
        let result = sqlx::query(
            "UPDATE custom_plans SET payment_status = $1, updated_at = now() WHERE id = $2",
        )
        .bind(CustomPlanPaymentStatus::Paid.as_str())
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl OrderStore for PgOrderStore {
    fn create_order<'a>(&'a self, order: &'a NewOrder) -> StoreFuture<'a, Uuid> {
        Box::pin(self.insert_order(order))
    }

    fn mark_custom_plan_paid<'a>(&'a self, id: &'a CustomPlanId) -> StoreFuture<'a, bool> {
        Box::pin(self.set_custom_plan_paid(id))
    }
}
