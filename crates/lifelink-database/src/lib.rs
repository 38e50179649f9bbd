//! # lifelink-database
//!
//! PostgreSQL connection management, store traits, and the concrete
//! store implementations for all LifeLink entities: the Postgres
//! repositories used in production and an in-memory backend used by
//! tests and local development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{DonorStore, MatchStore, NotificationStore, RequestStore};
