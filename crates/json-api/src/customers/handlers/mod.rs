//! Customer Handlers

pub(crate) mod create;
