// ============================================================================
// Order Domain - placement, payment, delivery and cancellation
// ============================================================================
//
// - Value objects (OrderLine, LineItem, OrderStatus)
// - Commands (CreateOrder, PayOrder, ChangeOrderStatus, ...)
// - Errors (OrderError enum)
// - Aggregate (Order and the status transition graph)
// - Command Handler (OrderCommandHandler)
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;

pub use value_objects::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;
