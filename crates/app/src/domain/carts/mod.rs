//! Carts
//!
//! The cart entity and the service that loads, mutates and saves it
//! against a session.

pub mod data;
pub mod errors;
pub mod models;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
