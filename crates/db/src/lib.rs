//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, typed row structs, repository functions for
//! every table in the stagebook schema, and the transaction settle helper.
//! No business logic lives here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod transaction;

pub use pool::DbPool;
pub use error::DbError;
