use std::sync::Arc;

use super::aggregate::User;
use super::commands::UserCommand;
use super::errors::UserError;
use super::value_objects::{Credentials, PersonalDetails};
use crate::dispatch::roles::{ADMINS, GUESTS, MEMBERS};
use crate::dispatch::{
    bind_operations, AuthorizationGate, Caller, OperationDescriptor,
    OperationProvider, OperationSpec, Outcome, Rejection, Request, SessionChange,
};
use crate::domain::UserId;
use crate::store::{Repository, Stores, Update, UserRepository};

// ============================================================================
// User Command Handler
// ============================================================================
//
// Account operations: sign in/out, registration, profile and credential
// edits. `login` asks the authorization gate which role the credentials
// resolve to and hands the session the matching table.
//
// ============================================================================

pub const USER_OPERATIONS: &[OperationSpec] = &[
    OperationSpec::open("login", GUESTS),
    OperationSpec::open("register", GUESTS),
    OperationSpec::open("signOut", MEMBERS),
    OperationSpec::gated("changePersonalInformation", MEMBERS),
    OperationSpec::gated("changeCredentials", MEMBERS),
    OperationSpec::gated("changeUserPersonalInformation", ADMINS),
    OperationSpec::gated("viewUsersPersonalInformation", ADMINS),
];

pub struct UserCommandHandler {
    stores: Stores,
    gate: AuthorizationGate,
}

impl UserCommandHandler {
    pub fn new(stores: Stores, gate: AuthorizationGate) -> Self {
        Self { stores, gate }
    }

    fn route(&self, caller: Caller<'_>, request: Request) -> Result<Outcome, Rejection> {
        let command = match request {
            Request::User(command) => command,
            other => {
                return Err(Rejection::InvalidArgument(format!(
                    "'{}' is not an account command",
                    other.command_name()
                )))
            }
        };

        let outcome = match command {
            UserCommand::Login(credentials) => self.login(credentials),
            UserCommand::Register(credentials) => self.register(&credentials).into(),
            UserCommand::SignOut => Outcome::Session(SessionChange::SignedOut),
            UserCommand::ChangePersonalInformation(details) => {
                self.change_personal_information(caller, &details).into()
            }
            UserCommand::ChangeCredentials(credentials) => {
                self.change_credentials(caller, &credentials).into()
            }
            UserCommand::ChangeUserPersonalInformation { user_id, details } => {
                self.change_user_personal_information(user_id, &details).into()
            }
            UserCommand::ViewUsersPersonalInformation => Outcome::Profiles(
                self.stores
                    .users
                    .get_all_registered()
                    .iter()
                    .map(User::profile)
                    .collect(),
            ),
        };

        Ok(outcome)
    }

    fn login(&self, credentials: Credentials) -> Outcome {
        match self.gate.identify(Some(&credentials)) {
            Some(role) => Outcome::Session(SessionChange::SignedIn {
                role,
                identity: credentials,
            }),
            None => Outcome::Session(SessionChange::LoginFailed),
        }
    }

    fn register(&self, credentials: &Credentials) -> Result<String, UserError> {
        let user = self
            .stores
            .users
            .add_unless(User::register(credentials), &|user| {
                user.login == credentials.login
            })
            .ok_or_else(|| UserError::LoginTaken(credentials.login.clone()))?;
        tracing::info!(user_id = %user.id, login = %user.login, "User registered");

        Ok("You have been registered successfully".to_string())
    }

    /// Stored record behind the caller's claimed login.
    fn current_user(&self, caller: Caller<'_>) -> Result<User, UserError> {
        caller
            .and_then(|credentials| self.stores.users.get_by_login(&credentials.login))
            .ok_or(UserError::CallerMissing)
    }

    fn change_personal_information(
        &self,
        caller: Caller<'_>,
        details: &PersonalDetails,
    ) -> Result<String, UserError> {
        let mut user = self.current_user(caller)?;
        let user_id = user.id;
        user.personal_information.replace_with(details);
        if !self.stores.users.update(user) {
            return Err(UserError::NotFound(user_id));
        }

        Ok("Profile information has been successfully changed".to_string())
    }

    fn change_credentials(
        &self,
        caller: Caller<'_>,
        credentials: &Credentials,
    ) -> Result<String, UserError> {
        let mut user = self.current_user(caller)?;
        let user_id = user.id;
        let previous = user.login.clone();
        user.change_credentials(credentials);

        match self
            .stores
            .users
            .update_unless(user, &|other| other.login == credentials.login)
        {
            Update::Applied => {}
            Update::Missing => return Err(UserError::NotFound(user_id)),
            Update::Conflict => return Err(UserError::LoginTaken(credentials.login.clone())),
        }
        tracing::info!(%user_id, from = %previous, to = %credentials.login, "Credentials changed");

        Ok("Credentials have been successfully changed".to_string())
    }

    fn change_user_personal_information(
        &self,
        user_id: UserId,
        details: &PersonalDetails,
    ) -> Result<String, UserError> {
        let mut user = self
            .stores
            .users
            .get_by_id(user_id)
            .ok_or(UserError::NotFound(user_id))?;
        user.personal_information.replace_with(details);
        if !self.stores.users.update(user) {
            return Err(UserError::NotFound(user_id));
        }

        Ok("User personal information has been changed successfully".to_string())
    }
}

impl OperationProvider for UserCommandHandler {
    fn provider_name(&self) -> &'static str {
        "users"
    }

    fn operations(self: Arc<Self>) -> Vec<OperationDescriptor> {
        bind_operations(self, USER_OPERATIONS, Self::route)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
