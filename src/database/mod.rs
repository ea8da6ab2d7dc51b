/*!
 * Append-only SQLite persistence for the translation dataset.
 *
 * One row per scored sentence; rows are never updated or deleted by
 * this crate. Downstream training tooling owns the `is_trained` flag.
 */

// Allow dead code - some repository accessors are for library consumers
#![allow(dead_code)]

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::DatasetRecord;
pub use repository::DatasetRepository;
