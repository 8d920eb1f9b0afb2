use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::product::Product;
use crate::domain::{LineItemId, ProductId};

// ============================================================================
// Order Value Objects
// ============================================================================

/// Order line as requested by a customer: a catalog product id and amount.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub amount: u32,
}

/// Stored order line item (ProductAndAmount).
///
/// Holds a snapshot of the catalog product taken when the order was placed,
/// so later catalog edits do not rewrite order history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub id: LineItemId,
    pub product: Product,
    pub amount: u32,
}

impl LineItem {
    pub fn snapshot(product: Product, amount: u32) -> Self {
        Self {
            id: LineItemId(0),
            product,
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    New,
    CanceledByTheAdministrator,
    PaymentReceived,
    Sent,
    CanceledByUser,
    Received,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::New,
        OrderStatus::CanceledByTheAdministrator,
        OrderStatus::PaymentReceived,
        OrderStatus::Sent,
        OrderStatus::CanceledByUser,
        OrderStatus::Received,
        OrderStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::CanceledByTheAdministrator => "CanceledByTheAdministrator",
            OrderStatus::PaymentReceived => "PaymentReceived",
            OrderStatus::Sent => "Sent",
            OrderStatus::CanceledByUser => "CanceledByUser",
            OrderStatus::Received => "Received",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("The specified status does not exist: {}", s))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
