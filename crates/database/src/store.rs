use crate::DbError;
use async_trait::async_trait;
use core_types::{Facility, FacilityFilter};

/// The abstract interface to wherever facility records live.
/// Handlers hold a `dyn FacilityStore`, allowing the underlying
/// implementation (Postgres or in-memory) to be swapped out.
#[async_trait]
pub trait FacilityStore: Send + Sync {
    /// Inserts a new facility and returns it as stored.
    /// Fails with `DbError::Conflict` if the uid is already taken.
    async fn create_facility(&self, facility: &Facility) -> Result<Facility, DbError>;

    /// Returns one page of facilities matching the filter, ordered by
    /// announcement date and then uid.
    async fn list_facilities(&self, filter: &FacilityFilter) -> Result<Vec<Facility>, DbError>;

    async fn get_facility(&self, uid: &str) -> Result<Facility, DbError>;

    /// Removes a facility. Fails with `DbError::NotFound` if it does not exist.
    async fn delete_facility(&self, uid: &str) -> Result<(), DbError>;
}
