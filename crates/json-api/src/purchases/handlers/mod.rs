//! Purchase Handlers

pub(crate) mod index;
