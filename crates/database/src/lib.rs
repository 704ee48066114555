//! # Database Crate
//!
//! This crate is the persistence gateway for facility records. It owns the
//! schema (as migrations), the SQL, and the mapping of storage failures onto
//! the service's conflict / not-found / persistence error kinds.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All database-specific logic lives here. Callers program
//!   against the `FacilityStore` trait and never see SQL.
//! - **Scoped transactions:** Each write runs in its own `sqlx::Transaction`,
//!   which is committed on success and rolled back when dropped on any other
//!   path.
//! - **Store-enforced consistency:** Duplicate uids are detected from the
//!   primary key's unique violation, never by a check-then-insert.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: build the pool and bring the schema up to date.
//! - `FacilityStore`: the create / list / get / delete contract.
//! - `DbRepository`: the PostgreSQL implementation.
//! - `MemoryStore`: an in-process implementation for tests and local tooling.
//! - `build_list_query`: turns a `FacilityFilter` into a bound SQL query.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod query;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::MemoryStore;
pub use query::build_list_query;
pub use repository::DbRepository;
pub use store::FacilityStore;
