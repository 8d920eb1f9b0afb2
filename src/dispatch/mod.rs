// ============================================================================
// Command Authorization & Dispatch
// ============================================================================
//
// - role:       caller roles and shared allowed-role sets
// - request:    typed request sum type, one variant per command
// - outcome:    closed result type handlers return
// - operation:  operation declarations and the provider trait
// - table:      per-role dispatch tables built from the declarations
// - gate:       credential + role check against the live user store
// - dispatcher: lookup -> validate -> authorize -> invoke
// - session:    active table and cached identity for one caller
//
// ============================================================================

mod dispatcher;
mod errors;
mod gate;
mod operation;
mod outcome;
mod request;
mod role;
mod session;
mod table;

pub use dispatcher::Dispatcher;
pub use errors::{Rejection, RegistryError};
pub use gate::AuthorizationGate;
pub use operation::{
    bind_operations, Access, Caller, Handler, OperationDescriptor, OperationProvider,
    OperationSpec,
};
pub use outcome::{BusinessError, FailureKind, Outcome, SessionChange};
pub use request::Request;
pub use role::{roles, Role};
pub use session::{Session, SessionState};
pub use table::{DispatchTable, DispatchTables};
