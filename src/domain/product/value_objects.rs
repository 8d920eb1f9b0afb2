use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Product Value Objects
// ============================================================================

/// Everything an admin supplies when adding or editing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    pub category: String,
    pub description: String,
    pub cost: Decimal,
}

impl ProductDetails {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name cannot be empty".to_string());
        }
        if self.cost < Decimal::ZERO {
            return Err(format!("Cost cannot be negative: {}", self.cost));
        }
        Ok(())
    }
}
