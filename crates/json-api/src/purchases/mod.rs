//! Purchases

mod handlers;

pub(crate) use handlers::*;
