//! Common library for the Burren services
//!
//! This crate provides shared functionality used by the Burren API service,
//! including database connectivity, error handling, password hashing and the
//! time source used for token expiry.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, init_pool, health_check};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod database;
pub mod error;
pub mod password;
