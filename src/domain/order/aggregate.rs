use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::OrderError;
use super::value_objects::{LineItem, OrderStatus};
use crate::domain::{OrderId, UserId};

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub customer_id: UserId,
    pub items: Vec<LineItem>,
    pub status: OrderStatus,
}

/// Whether an administrator may move an order from `from` to `to`.
///
/// Re-applying the current status is always allowed. Nothing leaves
/// `CanceledByUser`, `CanceledByTheAdministrator` or `Completed` except the
/// identity edge. `PaymentReceived -> Sent` is not an edge.
pub fn is_transition_permitted(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;

    if from == to {
        return true;
    }

    matches!(
        (from, to),
        (New, Sent)
            | (New, CanceledByTheAdministrator)
            | (Sent, CanceledByTheAdministrator)
            | (PaymentReceived, CanceledByTheAdministrator)
            | (Received, Completed)
    )
}

impl Order {
    /// Every order starts as `New`; the repository assigns the id.
    pub fn place(customer_id: UserId, items: Vec<LineItem>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: OrderId(0),
            created_at,
            customer_id,
            items,
            status: OrderStatus::New,
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.customer_id == user_id
    }

    /// Payment lands regardless of the current status.
    pub fn record_payment(&mut self) {
        self.status = OrderStatus::PaymentReceived;
    }

    /// Receipt lands regardless of the current status.
    pub fn mark_received(&mut self) {
        self.status = OrderStatus::Received;
    }

    /// Owner cancellation; refused once the goods were received.
    pub fn cancel_by_owner(&mut self) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Received | OrderStatus::Completed => {
                Err(OrderError::AlreadyReceived(self.status))
            }
            _ => {
                self.status = OrderStatus::CanceledByUser;
                Ok(())
            }
        }
    }

    /// Administrator-driven change, checked against the transition graph.
    pub fn change_status(&mut self, to: OrderStatus) -> Result<(), OrderError> {
        if !is_transition_permitted(self.status, to) {
            return Err(OrderError::IllegalTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
