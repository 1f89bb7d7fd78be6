//! Checkout
//!
//! Turns a session's cart into committed purchases and stock decrements.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
