pub mod models;
pub mod postgres;

pub use postgres::{LoadError, PostgresClient};
