//! Sales Statistics

mod handlers;

pub(crate) use handlers::*;
