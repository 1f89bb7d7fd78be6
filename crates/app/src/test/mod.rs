//! Shared test infrastructure.


pub(crate) use context::TestContext;
