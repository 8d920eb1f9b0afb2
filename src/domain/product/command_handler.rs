use std::sync::Arc;

use super::aggregate::Product;
use super::commands::ProductCommand;
use super::errors::ProductError;
use super::value_objects::ProductDetails;
use crate::dispatch::roles::{ADMINS, EVERYONE};
use crate::dispatch::{
    bind_operations, Caller, OperationDescriptor, OperationProvider, OperationSpec, Outcome,
    Rejection, Request,
};
use crate::domain::ProductId;
use crate::store::{ProductRepository, Repository, Stores, Update};

// ============================================================================
// Product Command Handler
// ============================================================================

pub const PRODUCT_OPERATIONS: &[OperationSpec] = &[
    OperationSpec::open("viewProducts", EVERYONE),
    OperationSpec::open("searchProductByName", EVERYONE),
    OperationSpec::gated("addNewProduct", ADMINS),
    OperationSpec::gated("changeProductInformation", ADMINS),
];

pub struct ProductCommandHandler {
    stores: Stores,
}

impl ProductCommandHandler {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    fn route(&self, _caller: Caller<'_>, request: Request) -> Result<Outcome, Rejection> {
        let command = match request {
            Request::Product(command) => command,
            other => {
                return Err(Rejection::InvalidArgument(format!(
                    "'{}' is not a catalog command",
                    other.command_name()
                )))
            }
        };

        let outcome = match command {
            ProductCommand::ViewProducts => Outcome::Products(self.stores.products.get_all()),
            ProductCommand::SearchProductByName { name } => {
                Outcome::Product(self.stores.products.get_by_name(&name))
            }
            ProductCommand::AddNewProduct(details) => self.add_new_product(&details).into(),
            ProductCommand::ChangeProductInformation {
                product_id,
                details,
            } => self.change_product_information(product_id, &details).into(),
        };

        Ok(outcome)
    }

    fn add_new_product(&self, details: &ProductDetails) -> Result<String, ProductError> {
        let product = self
            .stores
            .products
            .add_unless(Product::from_details(details), &|product| {
                product.name == details.name
            })
            .ok_or_else(|| ProductError::DuplicateName(details.name.clone()))?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product added");

        Ok("A new product has been added successfully".to_string())
    }

    fn change_product_information(
        &self,
        product_id: ProductId,
        details: &ProductDetails,
    ) -> Result<String, ProductError> {
        let mut product = self
            .stores
            .products
            .get_by_id(product_id)
            .ok_or(ProductError::NotFound(product_id))?;

        product.apply_details(details);
        match self
            .stores
            .products
            .update_unless(product, &|other| other.name == details.name)
        {
            Update::Applied => {}
            Update::Missing => return Err(ProductError::NotFound(product_id)),
            Update::Conflict => return Err(ProductError::DuplicateName(details.name.clone())),
        }
        tracing::info!(%product_id, "Product information changed");

        Ok("The product information has been changed".to_string())
    }
}

impl OperationProvider for ProductCommandHandler {
    fn provider_name(&self) -> &'static str {
        "products"
    }

    fn operations(self: Arc<Self>) -> Vec<OperationDescriptor> {
        bind_operations(self, PRODUCT_OPERATIONS, Self::route)
    }
}
