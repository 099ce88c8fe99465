pub mod error;
pub mod event;
pub mod id;
pub mod money;
pub mod order;
pub mod policy;
pub mod store;
