use crate::domain::ProductId;

// ============================================================================
// Product Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error("This product does not exist")]
    NotFound(ProductId),

    #[error("A product with this name already exists")]
    DuplicateName(String),
}
