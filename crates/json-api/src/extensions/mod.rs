//! Extension traits

mod depot;
mod error_kind;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use error_kind::ErrorKind;
pub(crate) use result::ResultExt as _;
