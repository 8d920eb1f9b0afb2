use serde::{Deserialize, Serialize};

use super::value_objects::{OrderLine, OrderStatus};
use crate::domain::OrderId;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderCommand {
    CreateOrder {
        lines: Vec<OrderLine>,
    },
    PayOrder {
        order_id: OrderId,
    },
    CancelOrder {
        order_id: OrderId,
    },
    ReviewOrderHistory,
    SetOrderStatusReceived {
        order_id: OrderId,
    },
    ChangeOrderStatus {
        order_id: OrderId,
        status: OrderStatus,
    },
}

impl OrderCommand {
    pub fn command_name(&self) -> &'static str {
        match self {
            OrderCommand::CreateOrder { .. } => "createOrder",
            OrderCommand::PayOrder { .. } => "payOrder",
            OrderCommand::CancelOrder { .. } => "cancelOrder",
            OrderCommand::ReviewOrderHistory => "reviewOrderHistory",
            OrderCommand::SetOrderStatusReceived { .. } => "setOrderStatusReceived",
            OrderCommand::ChangeOrderStatus { .. } => "changeOrderStatus",
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            OrderCommand::CreateOrder { lines } => {
                if lines.is_empty() {
                    return Err("Order must contain at least one product".to_string());
                }
                if let Some(line) = lines.iter().find(|line| line.amount == 0) {
                    return Err(format!("Invalid amount for product {}: 0", line.product_id));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
