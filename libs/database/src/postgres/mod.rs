//! PostgreSQL connection management

mod config;
mod connector;

pub use config::PostgresConfig;
pub use connector::{check_health, connect_from_config};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
