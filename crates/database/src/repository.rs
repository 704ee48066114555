use crate::query::build_list_query;
use crate::store::FacilityStore;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Facility, FacilityFilter};
use sqlx::postgres::PgPool;

const INSERT_FACILITY: &str = r#"
    INSERT INTO facility (
        uid, segment, company, technology, subcategory, investment_status,
        latitude, longitude, estimated_investment, announcement_date
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    RETURNING uid, segment, company, technology, subcategory, investment_status,
        latitude, longitude, estimated_investment, announcement_date
"#;

const SELECT_FACILITY: &str = r#"
    SELECT uid, segment, company, technology, subcategory, investment_status,
        latitude, longitude, estimated_investment, announcement_date
    FROM facility
    WHERE uid = $1
"#;

const DELETE_FACILITY: &str = "DELETE FROM facility WHERE uid = $1 RETURNING uid";

/// The `DbRepository` is the PostgreSQL-backed `FacilityStore`. It
/// encapsulates all SQL and maps driver errors onto `DbError`.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FacilityStore for DbRepository {
    /// Inserts the facility within its own transaction. A duplicate uid is
    /// reported by Postgres as a unique violation on the primary key, which is
    /// what makes two concurrent creates of the same uid resolve to exactly
    /// one success.
    async fn create_facility(&self, facility: &Facility) -> Result<Facility, DbError> {
        let mut tx = self.pool.begin().await?;

        let stored = sqlx::query_as::<_, Facility>(INSERT_FACILITY)
            .bind(&facility.uid)
            .bind(&facility.segment)
            .bind(&facility.company)
            .bind(&facility.technology)
            .bind(&facility.subcategory)
            .bind(&facility.investment_status)
            .bind(facility.latitude)
            .bind(facility.longitude)
            .bind(facility.estimated_investment)
            .bind(facility.announcement_date)
            .fetch_one(&mut *tx) // Note: must use the transaction object `tx` here
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    DbError::Conflict(facility.uid.clone())
                }
                other => other.into(),
            })?;

        tx.commit().await?;
        tracing::debug!(uid = %stored.uid, "Facility created.");
        Ok(stored)
    }

    async fn list_facilities(&self, filter: &FacilityFilter) -> Result<Vec<Facility>, DbError> {
        let mut query = build_list_query(filter);
        let facilities = query
            .build_query_as::<Facility>()
            .fetch_all(&self.pool)
            .await?;
        Ok(facilities)
    }

    async fn get_facility(&self, uid: &str) -> Result<Facility, DbError> {
        sqlx::query_as::<_, Facility>(SELECT_FACILITY)
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound(uid.to_string()))
    }

    /// Lookup and removal happen in one statement, so there is no window in
    /// which another request could delete the row between the two.
    async fn delete_facility(&self, uid: &str) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let deleted: Option<String> = sqlx::query_scalar(DELETE_FACILITY)
            .bind(uid)
            .fetch_optional(&mut *tx)
            .await?;

        if deleted.is_none() {
            // Dropping `tx` rolls the (empty) transaction back.
            return Err(DbError::NotFound(uid.to_string()));
        }

        tx.commit().await?;
        tracing::debug!(uid, "Facility deleted.");
        Ok(())
    }
}
