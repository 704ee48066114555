pub mod error;
pub mod facility;
pub mod filter;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use facility::{Facility, FacilityPayload};
pub use filter::{DEFAULT_LIMIT, FacilityFilter, FacilityQuery, MAX_LIMIT};
