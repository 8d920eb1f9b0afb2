use crate::domain::UserId;

// ============================================================================
// User Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("This login is already taken")]
    LoginTaken(String),

    #[error("The specified user doesn't exist")]
    NotFound(UserId),

    #[error("Your account no longer exists")]
    CallerMissing,
}
