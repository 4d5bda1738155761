//! Handlers behind the CLI subcommands. Each writes its output to the
//! given writer so it can run against stdout or a buffer.

pub mod engines;
pub mod query;

pub use engines::handle_engines;
pub use query::{QueryOptions, handle_query};
pub use self_test::handle_self_test;
