//! Shared helpers for integration tests

pub mod database_helper;
pub mod mail_mock;
pub mod test_context;
pub mod test_data;

pub use test_context::TestContext;
