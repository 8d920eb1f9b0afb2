// ============================================================================
// User Domain - accounts, credentials and personal information
// ============================================================================
//
// - Value objects (Credentials, PersonalInformation, UserKind, UserProfile)
// - Commands (Login, Register, ChangeCredentials, ...)
// - Errors (UserError enum)
// - Aggregate (User)
// - Command Handler (UserCommandHandler)
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
