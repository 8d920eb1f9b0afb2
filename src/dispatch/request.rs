use serde::{Deserialize, Serialize};

use super::errors::Rejection;
use crate::domain::order::OrderCommand;
use crate::domain::product::ProductCommand;
use crate::domain::user::UserCommand;

// ============================================================================
// Request - one typed payload per command
// ============================================================================
//
// The command name is derived from the variant, so a request can never be
// routed to a handler expecting a different payload shape.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "aggregate", content = "command")]
pub enum Request {
    User(UserCommand),
    Product(ProductCommand),
    Order(OrderCommand),
}

impl Request {
    pub fn command_name(&self) -> &'static str {
        match self {
            Request::User(command) => command.command_name(),
            Request::Product(command) => command.command_name(),
            Request::Order(command) => command.command_name(),
        }
    }

    /// Input validation; runs before the authorization gate.
    pub fn validate(&self) -> Result<(), Rejection> {
        let result = match self {
            Request::User(command) => command.validate(),
            Request::Product(command) => command.validate(),
            Request::Order(command) => command.validate(),
        };
        result.map_err(Rejection::InvalidArgument)
    }
}

impl From<UserCommand> for Request {
    fn from(command: UserCommand) -> Self {
        Request::User(command)
    }
}

impl From<ProductCommand> for Request {
    fn from(command: ProductCommand) -> Self {
        Request::Product(command)
    }
}

impl From<OrderCommand> for Request {
    fn from(command: OrderCommand) -> Self {
        Request::Order(command)
    }
}
