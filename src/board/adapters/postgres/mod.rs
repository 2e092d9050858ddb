//! `PostgreSQL` adapters for account-scoped board persistence.

mod models;
mod repository;
mod schema;

pub use repository::{BoardPgPool, PostgresStore};
