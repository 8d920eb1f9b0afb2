use std::sync::Arc;

use super::role::Role;
use crate::domain::user::{Credentials, UserKind};
use crate::store::UserRepository;

// ============================================================================
// Authorization Gate
// ============================================================================
//
// Verifies a claimed identity against the live user store and checks the
// resulting role against an operation's allowed set. Login only selects the
// visible table; every gated call comes back here.
//
// ============================================================================

#[derive(Clone)]
pub struct AuthorizationGate {
    users: Arc<dyn UserRepository>,
}

/// Map a stored user kind to its role. Guests are never stored identities.
fn role_of(kind: UserKind) -> Option<Role> {
    match kind {
        UserKind::Admin => Some(Role::Admin),
        UserKind::RegisteredUser => Some(Role::RegisteredUser),
        UserKind::Guest => None,
    }
}

impl AuthorizationGate {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Role of the stored user matching `claimed`, if the password is exact.
    ///
    /// Performs exactly one lookup by login.
    pub fn identify(&self, claimed: Option<&Credentials>) -> Option<Role> {
        let claimed = claimed?;
        let user = self.users.get_by_login(&claimed.login)?;
        if !user.password_matches(&claimed.password) {
            tracing::debug!(login = %claimed.login, "Password mismatch");
            return None;
        }
        role_of(user.kind)
    }

    pub fn authorize(&self, claimed: Option<&Credentials>, allowed_roles: &[Role]) -> bool {
        match self.identify(claimed) {
            Some(role) => allowed_roles.contains(&role),
            None => false,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
