use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller role; each role owns exactly one dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Guest,
    RegisteredUser,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Guest, Role::RegisteredUser, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::RegisteredUser => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allowed-role sets shared by the operation declarations.
pub mod roles {
    use super::Role;

    pub const EVERYONE: &[Role] = &[Role::Guest, Role::RegisteredUser, Role::Admin];
    pub const GUESTS: &[Role] = &[Role::Guest];
    pub const CUSTOMERS: &[Role] = &[Role::RegisteredUser];
    pub const ADMINS: &[Role] = &[Role::Admin];
    pub const MEMBERS: &[Role] = &[Role::RegisteredUser, Role::Admin];
}
