//! Repositories for database operations

pub mod movie;
pub mod review;
pub mod user;

// Re-export for convenience
pub use movie::MovieRepository;
pub use review::ReviewRepository;
pub use user::UserRepository;

use common::error::{DatabaseError, DatabaseResult};
use uuid::Uuid;

/// Parse a raw identifier into the store's identifier type.
///
/// A string that is not a well-formed UUID yields
/// [`DatabaseError::InvalidIdentifier`] rather than a generic query error.
pub fn parse_id(raw: &str) -> DatabaseResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| DatabaseError::InvalidIdentifier(raw.to_string()))
}
