//! Stats service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsServiceError {
    #[error("could not determine the start of the day")]
    Calendar(#[from] jiff::Error),

    #[error("storage error")]
    Sql(#[from] Error),
}
