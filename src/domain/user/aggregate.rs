use serde::{Deserialize, Serialize};

use super::value_objects::{Credentials, PersonalInformation, UserKind, UserProfile};
use crate::domain::UserId;

// ============================================================================
// User Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub login: String,
    pub password: String,
    pub personal_information: PersonalInformation,
    pub kind: UserKind,
}

impl User {
    /// A fresh registered user with empty personal information.
    ///
    /// The id is assigned by the repository on insert.
    pub fn register(credentials: &Credentials) -> Self {
        Self {
            id: UserId(0),
            login: credentials.login.clone(),
            password: credentials.password.clone(),
            personal_information: PersonalInformation::default(),
            kind: UserKind::RegisteredUser,
        }
    }

    pub fn admin(credentials: &Credentials) -> Self {
        Self {
            kind: UserKind::Admin,
            ..Self::register(credentials)
        }
    }

    /// Exact match on the stored password.
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn change_credentials(&mut self, credentials: &Credentials) {
        self.login = credentials.login.clone();
        self.password = credentials.password.clone();
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.id,
            login: self.login.clone(),
            personal_information: self.personal_information.clone(),
        }
    }
}
