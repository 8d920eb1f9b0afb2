use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::ProductDetails;
use crate::domain::ProductId;

// ============================================================================
// Product Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub cost: Decimal,
}

impl Product {
    /// New catalog entry; the repository assigns the id.
    pub fn from_details(details: &ProductDetails) -> Self {
        Self {
            id: ProductId(0),
            name: details.name.clone(),
            category: details.category.clone(),
            description: details.description.clone(),
            cost: details.cost,
        }
    }

    pub fn apply_details(&mut self, details: &ProductDetails) {
        self.name = details.name.clone();
        self.category = details.category.clone();
        self.description = details.description.clone();
        self.cost = details.cost;
    }
}
