use serde::Serialize;

use super::role::Role;
use crate::domain::order::{Order, OrderError};
use crate::domain::product::{Product, ProductError};
use crate::domain::user::{Credentials, UserError, UserProfile};

// ============================================================================
// Outcome - closed set of handler results
// ============================================================================

/// Business-level refusal, returned as a normal outcome rather than a fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BusinessError {
    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    EntityNotFound,
    DuplicateKey,
    IllegalTransition,
    Forbidden,
}

impl BusinessError {
    pub fn kind(&self) -> FailureKind {
        match self {
            BusinessError::User(UserError::LoginTaken(_)) => FailureKind::DuplicateKey,
            BusinessError::User(UserError::NotFound(_) | UserError::CallerMissing) => {
                FailureKind::EntityNotFound
            }
            BusinessError::Product(ProductError::NotFound(_)) => FailureKind::EntityNotFound,
            BusinessError::Product(ProductError::DuplicateName(_)) => FailureKind::DuplicateKey,
            BusinessError::Order(OrderError::NotFound(_) | OrderError::ProductNotFound(_)) => {
                FailureKind::EntityNotFound
            }
            BusinessError::Order(OrderError::IllegalTransition { .. }) => {
                FailureKind::IllegalTransition
            }
            BusinessError::Order(OrderError::AlreadyReceived(_) | OrderError::NotOwner(_)) => {
                FailureKind::Forbidden
            }
        }
    }
}

/// Which table the session should expose next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn { role: Role, identity: Credentials },
    LoginFailed,
    SignedOut,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Message(String),
    Refused(BusinessError),
    Product(Option<Product>),
    Products(Vec<Product>),
    Orders(Vec<Order>),
    Profiles(Vec<UserProfile>),
    Session(SessionChange),
}

impl Outcome {
    pub fn message(text: impl Into<String>) -> Self {
        Outcome::Message(text.into())
    }

    pub fn refused(error: impl Into<BusinessError>) -> Self {
        Outcome::Refused(error.into())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Refused(_) => "refused",
            _ => "ok",
        }
    }
}

impl<E: Into<BusinessError>> From<Result<String, E>> for Outcome {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(message) => Outcome::Message(message),
            Err(error) => Outcome::refused(error),
        }
    }
}
