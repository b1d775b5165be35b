//! Exchange-agnostic order types and input validation.

pub mod order;
pub mod validate;

pub use order::{OrderDraft, OrderRequest, OrderResult, OrderStatus, OrderType, Side, TimeInForce};
pub use validate::validate;
