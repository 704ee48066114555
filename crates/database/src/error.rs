use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("A database error occurred: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("A facility with uid `{0}` already exists.")]
    Conflict(String),

    #[error("No facility with uid `{0}` was found in the database.")]
    NotFound(String),
}
