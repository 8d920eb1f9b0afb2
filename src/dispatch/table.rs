use std::collections::BTreeMap;
use std::sync::Arc;

use super::errors::RegistryError;
use super::operation::{OperationDescriptor, OperationProvider};
use super::role::Role;

// ============================================================================
// Dispatch Tables - one immutable command table per role
// ============================================================================
//
// Built once at startup by projecting each operation into every table whose
// role is in its allowed set. A command absent from the caller's table is
// rejected before anything else looks at the request.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct DispatchTable {
    role: Role,
    entries: BTreeMap<&'static str, OperationDescriptor>,
}

impl DispatchTable {
    fn empty(role: Role) -> Self {
        Self {
            role,
            entries: BTreeMap::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn get(&self, command: &str) -> Option<&OperationDescriptor> {
        self.entries.get(command)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.entries.contains_key(command)
    }

    /// Command names in sorted order.
    pub fn commands(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct DispatchTables {
    guest: DispatchTable,
    user: DispatchTable,
    admin: DispatchTable,
}

impl DispatchTables {
    /// Collect every provider's operations and partition them by role.
    pub fn build(providers: Vec<Arc<dyn OperationProvider>>) -> Result<Self, RegistryError> {
        let operations = providers
            .into_iter()
            .flat_map(|provider| provider.operations())
            .collect();
        Self::from_operations(operations)
    }

    pub fn from_operations(operations: Vec<OperationDescriptor>) -> Result<Self, RegistryError> {
        let mut registry: BTreeMap<&'static str, OperationDescriptor> = BTreeMap::new();

        for operation in operations {
            if operation.command().is_empty() {
                return Err(RegistryError::EmptyCommandName {
                    provider: operation.provider.to_string(),
                });
            }
            if operation.allowed_roles().is_empty() {
                return Err(RegistryError::NoAllowedRoles {
                    command: operation.command().to_string(),
                });
            }

            if let Some(existing) = registry.get(operation.command()) {
                if !existing.same_handler(&operation) {
                    return Err(RegistryError::AmbiguousCommand {
                        command: operation.command().to_string(),
                        first: existing.provider.to_string(),
                        second: operation.provider.to_string(),
                    });
                }
                continue;
            }

            registry.insert(operation.command(), operation);
        }

        let mut tables = Self {
            guest: DispatchTable::empty(Role::Guest),
            user: DispatchTable::empty(Role::RegisteredUser),
            admin: DispatchTable::empty(Role::Admin),
        };

        for (command, operation) in registry {
            for role in Role::ALL {
                if operation.allows(role) {
                    tables
                        .table_mut(role)
                        .entries
                        .insert(command, operation.clone());
                }
            }
        }

        tracing::info!(
            guest = tables.guest.len(),
            user = tables.user.len(),
            admin = tables.admin.len(),
            "Dispatch tables built"
        );

        Ok(tables)
    }

    pub fn table(&self, role: Role) -> &DispatchTable {
        match role {
            Role::Guest => &self.guest,
            Role::RegisteredUser => &self.user,
            Role::Admin => &self.admin,
        }
    }

    fn table_mut(&mut self, role: Role) -> &mut DispatchTable {
        match role {
            Role::Guest => &mut self.guest,
            Role::RegisteredUser => &mut self.user,
            Role::Admin => &mut self.admin,
        }
    }

    pub fn guest(&self) -> &DispatchTable {
        &self.guest
    }

    pub fn user(&self) -> &DispatchTable {
        &self.user
    }

    pub fn admin(&self) -> &DispatchTable {
        &self.admin
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
