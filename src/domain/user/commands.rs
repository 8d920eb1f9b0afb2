use serde::{Deserialize, Serialize};

use super::value_objects::{Credentials, PersonalDetails};
use crate::domain::UserId;

// ============================================================================
// User Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserCommand {
    Login(Credentials),
    Register(Credentials),
    SignOut,
    ChangePersonalInformation(PersonalDetails),
    ChangeCredentials(Credentials),
    ChangeUserPersonalInformation {
        user_id: UserId,
        details: PersonalDetails,
    },
    ViewUsersPersonalInformation,
}

impl UserCommand {
    pub fn command_name(&self) -> &'static str {
        match self {
            UserCommand::Login(_) => "login",
            UserCommand::Register(_) => "register",
            UserCommand::SignOut => "signOut",
            UserCommand::ChangePersonalInformation(_) => "changePersonalInformation",
            UserCommand::ChangeCredentials(_) => "changeCredentials",
            UserCommand::ChangeUserPersonalInformation { .. } => "changeUserPersonalInformation",
            UserCommand::ViewUsersPersonalInformation => "viewUsersPersonalInformation",
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            UserCommand::Register(credentials) | UserCommand::ChangeCredentials(credentials) => {
                if credentials.login.trim().is_empty() {
                    return Err("Login cannot be empty".to_string());
                }
                if credentials.password.is_empty() {
                    return Err("Password cannot be empty".to_string());
                }
                Ok(())
            }
            UserCommand::ChangePersonalInformation(details)
            | UserCommand::ChangeUserPersonalInformation { details, .. } => details.validate(),
            UserCommand::Login(_)
            | UserCommand::SignOut
            | UserCommand::ViewUsersPersonalInformation => Ok(()),
        }
    }
}
