use crate::store::FacilityStore;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Facility, FacilityFilter};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// An in-process `FacilityStore` with the same observable semantics as the
/// Postgres repository: unique uids, the same filter predicate and the same
/// `(announcement_date, uid)` ordering.
///
/// It exists so the request handlers can be exercised without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<BTreeMap<String, Facility>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FacilityStore for MemoryStore {
    async fn create_facility(&self, facility: &Facility) -> Result<Facility, DbError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&facility.uid) {
            return Err(DbError::Conflict(facility.uid.clone()));
        }
        rows.insert(facility.uid.clone(), facility.clone());
        Ok(facility.clone())
    }

    async fn list_facilities(&self, filter: &FacilityFilter) -> Result<Vec<Facility>, DbError> {
        let rows = self.rows.read().await;
        let mut matching: Vec<&Facility> = rows.values().filter(|f| filter.matches(f)).collect();
        matching.sort_by(|a, b| {
            a.announcement_date
                .cmp(&b.announcement_date)
                .then_with(|| a.uid.cmp(&b.uid))
        });

        // The filter has already validated both values as non-negative.
        let offset = usize::try_from(filter.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit).unwrap_or(0);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_facility(&self, uid: &str) -> Result<Facility, DbError> {
        self.rows
            .read()
            .await
            .get(uid)
            .cloned()
            .ok_or_else(|| DbError::NotFound(uid.to_string()))
    }

    async fn delete_facility(&self, uid: &str) -> Result<(), DbError> {
        self.rows
            .write()
            .await
            .remove(uid)
            .map(|_| ())
            .ok_or_else(|| DbError::NotFound(uid.to_string()))
    }
}
