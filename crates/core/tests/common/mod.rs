//! Shared fixtures for the integration tests.


pub use harness::{TestContext, init_tracing, program};
