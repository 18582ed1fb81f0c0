//! Shared kernel for the booking, routing and handling contexts.
//!
//! Only identifiers and error vocabulary live here. Anything with behaviour
//! belongs to the context that owns it.

pub mod error;
pub mod types;

pub use error::{ErrorKind, RepositoryError, ValidationError};
pub use types::{TrackingId, UnLocode, VoyageNumber};
