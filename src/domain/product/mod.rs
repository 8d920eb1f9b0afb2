// ============================================================================
// Product Domain - the catalog
// ============================================================================
//
// Catalog edits never reach existing orders: line items hold their own
// copy of the product taken when the order was placed.
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
