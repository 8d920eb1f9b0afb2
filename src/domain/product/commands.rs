use serde::{Deserialize, Serialize};

use super::value_objects::ProductDetails;
use crate::domain::ProductId;

// ============================================================================
// Product Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductCommand {
    ViewProducts,
    SearchProductByName {
        name: String,
    },
    AddNewProduct(ProductDetails),
    ChangeProductInformation {
        product_id: ProductId,
        details: ProductDetails,
    },
}

impl ProductCommand {
    pub fn command_name(&self) -> &'static str {
        match self {
            ProductCommand::ViewProducts => "viewProducts",
            ProductCommand::SearchProductByName { .. } => "searchProductByName",
            ProductCommand::AddNewProduct(_) => "addNewProduct",
            ProductCommand::ChangeProductInformation { .. } => "changeProductInformation",
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            ProductCommand::AddNewProduct(details)
            | ProductCommand::ChangeProductInformation { details, .. } => details.validate(),
            ProductCommand::ViewProducts | ProductCommand::SearchProductByName { .. } => Ok(()),
        }
    }
}
