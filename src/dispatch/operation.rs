use std::fmt;
use std::sync::Arc;

use super::errors::Rejection;
use super::outcome::Outcome;
use super::request::Request;
use super::role::Role;
use crate::domain::user::Credentials;

// ============================================================================
// Operation Descriptors
// ============================================================================
//
// Every business operation declares, next to its implementation, the command
// name it answers to and the roles allowed to call it. Providers hand these
// declarations to the table builder at startup; nothing is discovered at
// runtime.
//
// ============================================================================

/// Identity claimed by the caller, if any.
pub type Caller<'a> = Option<&'a Credentials>;

pub type Handler = Arc<dyn Fn(Caller<'_>, Request) -> Result<Outcome, Rejection> + Send + Sync>;

/// Whether the authorization gate runs before the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Table membership is the only check.
    Open,
    /// Caller credentials are re-verified against the user store on every call.
    Gated,
}

/// Static declaration of one operation, kept beside its handler code.
#[derive(Debug, Clone, Copy)]
pub struct OperationSpec {
    pub command: &'static str,
    pub roles: &'static [Role],
    pub access: Access,
}

impl OperationSpec {
    pub const fn open(command: &'static str, roles: &'static [Role]) -> Self {
        Self {
            command,
            roles,
            access: Access::Open,
        }
    }

    pub const fn gated(command: &'static str, roles: &'static [Role]) -> Self {
        Self {
            command,
            roles,
            access: Access::Gated,
        }
    }
}

#[derive(Clone)]
pub struct OperationDescriptor {
    pub provider: &'static str,
    pub spec: OperationSpec,
    pub handler: Handler,
}

impl OperationDescriptor {
    pub fn new<F>(provider: &'static str, spec: OperationSpec, handler: F) -> Self
    where
        F: Fn(Caller<'_>, Request) -> Result<Outcome, Rejection> + Send + Sync + 'static,
    {
        Self {
            provider,
            spec,
            handler: Arc::new(handler),
        }
    }

    pub fn command(&self) -> &'static str {
        self.spec.command
    }

    pub fn allowed_roles(&self) -> &'static [Role] {
        self.spec.roles
    }

    pub fn allows(&self, role: Role) -> bool {
        self.spec.roles.contains(&role)
    }

    pub fn access(&self) -> Access {
        self.spec.access
    }

    /// Run the handler. The request must carry this operation's command.
    pub fn invoke(&self, caller: Caller<'_>, request: Request) -> Result<Outcome, Rejection> {
        if request.command_name() != self.spec.command {
            return Err(Rejection::InvalidArgument(format!(
                "'{}' cannot be handled by '{}'",
                request.command_name(),
                self.spec.command
            )));
        }
        (self.handler)(caller, request)
    }

    pub fn same_handler(&self, other: &OperationDescriptor) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("provider", &self.provider)
            .field("command", &self.spec.command)
            .field("roles", &self.spec.roles)
            .field("access", &self.spec.access)
            .finish()
    }
}

/// A business-operation provider (one per aggregate).
pub trait OperationProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Declarations served by this provider, with handlers bound to `self`.
    fn operations(self: Arc<Self>) -> Vec<OperationDescriptor>;
}

/// Bind each spec to `route` on a shared provider instance.
///
/// Every descriptor gets its own handler allocation, so two specs never
/// compare as the same handler.
pub fn bind_operations<P>(
    provider: Arc<P>,
    specs: &[OperationSpec],
    route: fn(&P, Caller<'_>, Request) -> Result<Outcome, Rejection>,
) -> Vec<OperationDescriptor>
where
    P: OperationProvider + 'static,
{
    specs
        .iter()
        .map(|spec| {
            let bound = Arc::clone(&provider);
            OperationDescriptor::new(provider.provider_name(), *spec, move |caller, request| {
                route(&bound, caller, request)
            })
        })
        .collect()
}
