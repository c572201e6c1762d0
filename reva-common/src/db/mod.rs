//! Database access layer shared across reva crates

pub mod init;
pub mod models;

pub use init::{create_schema, init_database};
pub use models::{NewReview, Review, Sentiment};
