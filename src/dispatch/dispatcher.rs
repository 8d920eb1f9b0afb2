use super::errors::Rejection;
use super::gate::AuthorizationGate;
use super::operation::{Access, Caller};
use super::outcome::Outcome;
use super::request::Request;
use super::role::Role;
use super::table::DispatchTables;

// ============================================================================
// Dispatcher
// ============================================================================
//
// Per request: table lookup -> input validation -> authorization gate
// (gated operations only) -> handler. Each stage can reject; later stages
// never see a request an earlier stage rejected.
//
// ============================================================================

pub struct Dispatcher {
    tables: DispatchTables,
    gate: AuthorizationGate,
}

impl Dispatcher {
    pub fn new(tables: DispatchTables, gate: AuthorizationGate) -> Self {
        Self { tables, gate }
    }

    pub fn tables(&self) -> &DispatchTables {
        &self.tables
    }

    pub fn dispatch(
        &self,
        role: Role,
        caller: Caller<'_>,
        request: Request,
    ) -> Result<Outcome, Rejection> {
        let command = request.command_name();

        let operation = self.tables.table(role).get(command).ok_or_else(|| {
            tracing::debug!(command, %role, "Command not in table");
            Rejection::UnknownCommand {
                command: command.to_string(),
                role,
            }
        })?;

        request.validate()?;

        if operation.access() == Access::Gated
            && !self.gate.authorize(caller, operation.allowed_roles())
        {
            tracing::warn!(
                command,
                %role,
                login = caller.map(|c| c.login.as_str()).unwrap_or("<none>"),
                "Authorization denied"
            );
            return Err(Rejection::AuthorizationDenied {
                command: command.to_string(),
            });
        }

        operation.invoke(caller, request)
    }
}
