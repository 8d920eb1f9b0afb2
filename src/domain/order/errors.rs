use super::value_objects::OrderStatus;
use crate::domain::{OrderId, ProductId};

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("This order doesn't exist")]
    NotFound(OrderId),

    #[error("This product does not exist")]
    ProductNotFound(ProductId),

    #[error("You can only manage your own orders")]
    NotOwner(OrderId),

    #[error("You can't cancel an order that has already been received")]
    AlreadyReceived(OrderStatus),

    #[error("This status change is illegal")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },
}
