//! Service layer holding the in-memory roster and its operations.
//! - The HTTP layer depends only on `roster::RosterRepository`.
//! - All failures are classified as `errors::ServiceError`.

pub mod errors;
pub mod roster;
