use serde::{Deserialize, Serialize};

use crate::domain::UserId;

// ============================================================================
// User Value Objects
// ============================================================================

/// Login + password pair claimed by a caller.
///
/// Captured by the session at login time and replayed to the authorization
/// gate on every gated call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

/// Contact details owned by exactly one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInformation {
    pub id: u64,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
}

impl PersonalInformation {
    /// Overwrite the editable fields, keeping the identity.
    pub fn replace_with(&mut self, details: &PersonalDetails) {
        self.name = details.name.clone();
        self.surname = details.surname.clone();
        self.email = details.email.clone();
        self.phone_number = details.phone_number.clone();
    }
}

/// Editable part of [`PersonalInformation`], as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
}

impl PersonalDetails {
    /// Shape check on email and phone number.
    pub fn validate(&self) -> Result<(), String> {
        let (local, domain) = self
            .email
            .split_once('@')
            .ok_or_else(|| format!("Not an email address: {}", self.email))?;
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(format!("Not an email address: {}", self.email));
        }

        let phone = self.phone_number.strip_prefix('+').unwrap_or(&self.phone_number);
        let digits = phone.chars().filter(char::is_ascii_digit).count();
        let separators_only = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '.' | ' ' | '(' | ')'));
        if !separators_only || !(7..=15).contains(&digits) {
            return Err(format!("Not a phone number: {}", self.phone_number));
        }

        Ok(())
    }
}

/// Concrete kind of a user record.
///
/// `Guest` never appears in the store; it marks an unauthenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserKind {
    Guest,
    RegisteredUser,
    Admin,
}

/// What `viewUsersPersonalInformation` returns per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub login: String,
    pub personal_information: PersonalInformation,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn details(email: &str, phone: &str) -> PersonalDetails {
        PersonalDetails {
            name: "James".to_string(),
            surname: "Bond".to_string(),
            email: email.to_string(),
            phone_number: phone.to_string(),
        }
    }

    #[test]
    fn test_valid_details_pass() {
        assert!(details("james@bond.com", "380680000000").validate().is_ok());
        assert!(details("a@b.org", "+38 (068) 130-00-00").validate().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(details("james.bond.com", "380680000000").validate().is_err());
        assert!(details("@bond.com", "380680000000").validate().is_err());
        assert!(details("james@localhost", "380680000000").validate().is_err());
    }

    #[test]
    fn test_invalid_phone_rejected() {
        assert!(details("james@bond.com", "call me").validate().is_err());
        assert!(details("james@bond.com", "123").validate().is_err());
    }

    #[test]
    fn test_replace_keeps_identity() {
        let mut info = PersonalInformation {
            id: 7,
            ..PersonalInformation::default()
        };
        info.replace_with(&details("james@bond.com", "380680000000"));

        assert_eq!(info.id, 7);
        assert_eq!(info.name, "James");
        assert_eq!(info.email, "james@bond.com");
    }
}
