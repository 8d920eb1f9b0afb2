use super::role::Role;

// ============================================================================
// Dispatch Errors
// ============================================================================

/// Registry wiring faults. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Operation '{command}' declares no allowed roles")]
    NoAllowedRoles { command: String },

    #[error("Operation from provider '{provider}' has an empty command name")]
    EmptyCommandName { provider: String },

    #[error("Command '{command}' is declared by both '{first}' and '{second}' with different handlers")]
    AmbiguousCommand {
        command: String,
        first: String,
        second: String,
    },
}

/// Why a single request was not executed. The session survives all of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Invalid command '{command}' for {role}")]
    UnknownCommand { command: String, role: Role },

    #[error("Authorization failed")]
    AuthorizationDenied { command: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Rejection {
    pub fn label(&self) -> &'static str {
        match self {
            Rejection::UnknownCommand { .. } => "unknown_command",
            Rejection::AuthorizationDenied { .. } => "authorization_denied",
            Rejection::InvalidArgument(_) => "invalid_argument",
        }
    }
}
