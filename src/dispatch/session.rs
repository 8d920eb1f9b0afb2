use std::sync::Arc;
use uuid::Uuid;

use super::dispatcher::Dispatcher;
use super::errors::Rejection;
use super::outcome::{Outcome, SessionChange};
use super::request::Request;
use super::role::Role;
use super::table::DispatchTable;
use crate::domain::user::Credentials;
use crate::metrics::Metrics;

// ============================================================================
// Session - which table is visible, and as whom
// ============================================================================
//
// The identity captured at login is replayed verbatim on every gated call.
// It is never refreshed from the store, so a password change or account
// removal takes effect on the next gated call.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated { role: Role, identity: Credentials },
}

pub struct Session {
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<Metrics>,
    state: SessionState,
}

impl Session {
    /// Starts unauthenticated, with the guest table active.
    pub fn new(dispatcher: Arc<Dispatcher>, metrics: Arc<Metrics>) -> Self {
        Self {
            dispatcher,
            metrics,
            state: SessionState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn role(&self) -> Role {
        match &self.state {
            SessionState::Unauthenticated => Role::Guest,
            SessionState::Authenticated { role, .. } => *role,
        }
    }

    pub fn identity(&self) -> Option<&Credentials> {
        match &self.state {
            SessionState::Unauthenticated => None,
            SessionState::Authenticated { identity, .. } => Some(identity),
        }
    }

    pub fn active_table(&self) -> &DispatchTable {
        self.dispatcher.tables().table(self.role())
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn dispatch(&mut self, request: Request) -> Result<Outcome, Rejection> {
        let request_id = Uuid::new_v4();
        let command = request.command_name();
        let role = self.role();
        let span = tracing::info_span!("dispatch", %request_id, command, %role);
        let _guard = span.enter();

        let result = self.dispatcher.dispatch(role, self.identity(), request);

        match &result {
            Ok(outcome) => {
                self.metrics.record_dispatch(command, outcome.label());
                if let Outcome::Session(change) = outcome {
                    self.apply(change.clone());
                }
            }
            Err(rejection) => {
                self.metrics.record_dispatch(command, rejection.label());
                if let Rejection::AuthorizationDenied { .. } = rejection {
                    self.metrics.record_denial(command);
                }
            }
        }

        result
    }

    fn apply(&mut self, change: SessionChange) {
        match change {
            SessionChange::SignedIn { role, identity } => {
                tracing::info!(login = %identity.login, %role, "Signed in");
                self.metrics.record_login(true);
                self.state = SessionState::Authenticated { role, identity };
            }
            SessionChange::LoginFailed => {
                tracing::info!("Login failed, guest table active");
                self.metrics.record_login(false);
                self.state = SessionState::Unauthenticated;
            }
            SessionChange::SignedOut => {
                tracing::info!("Signed out");
                self.state = SessionState::Unauthenticated;
            }
        }
    }
}
