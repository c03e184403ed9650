//! Testing infrastructure for monlivre integration tests.
//!
//! - `FakeBackend`: in-memory `LibraryBackend` that records every call
//! - `fixtures`: raw backend payloads in the shapes the real server sends
//! - `TestWorld`: isolated workspace directory for CLI runs
//! - `assertions`: checks over the CLI's JSON output

pub mod assertions;
pub mod backend;
pub mod fixtures;
pub mod world;

pub use backend::{Endpoint, FakeBackend, RecordedCall};
pub use world::{CliResult, TestWorld};
