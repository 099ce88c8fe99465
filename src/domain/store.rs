use {
    super::{error::PersistenceError, id::CustomPlanId, order::NewOrder},
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PersistenceError>> + Send + 'a>>;

/// Durable home for orders and the custom plans they settle. The two
/// operations are independent: no transaction spans them.
pub trait OrderStore: Send + Sync {
    /// Insert a new order and return its id.
    fn create_order<'a>(&'a self, order: &'a NewOrder) -> StoreFuture<'a, Uuid>;

    /// Set the plan's payment status to paid. Returns `false` when no plan
    /// with that id exists. Setting it again is a no-op.
    fn mark_custom_plan_paid<'a>(&'a self, id: &'a CustomPlanId) -> StoreFuture<'a, bool>;
}
