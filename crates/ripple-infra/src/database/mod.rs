//! Database repositories: SeaORM/Postgres plus the in-memory fallback used
//! when no database is configured.

mod connections;
pub mod entity;
mod memory;
mod postgres_base;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use memory::{InMemoryPostRepository, InMemoryUserRepository};
pub use postgres_repo::{PostgresPostRepository, PostgresUserRepository};

#[cfg(test)]
mod tests;
