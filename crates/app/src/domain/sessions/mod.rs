//! Sessions
//!
//! A session ties a bearer token to one customer and carries that
//! customer's in-progress cart.

pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod token;

pub use errors::SessionsServiceError;
pub use service::*;
