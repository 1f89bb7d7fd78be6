//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use salessense_app::domain::sessions::records::SessionRecord;

use super::ErrorKind;

const SESSION_DEPOT_KEY: &str = "session";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the session the request authenticated as.
    fn insert_session(&mut self, session: SessionRecord);

    /// The authenticated session, or 401 when the route was reached without one.
    fn session_or_401(&self) -> Result<&SessionRecord, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| ErrorKind::internal())
    }

    fn insert_session(&mut self, session: SessionRecord) {
        self.insert(SESSION_DEPOT_KEY, session);
    }

    fn session_or_401(&self) -> Result<&SessionRecord, StatusError> {
        self.get::<SessionRecord>(SESSION_DEPOT_KEY)
            .map_err(|_ignored| ErrorKind::Unauthorized.error("Missing session"))
    }
}
