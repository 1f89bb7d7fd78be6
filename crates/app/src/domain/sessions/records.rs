//! Session Records

use jiff::Timestamp;

use crate::{domain::customers::records::CustomerUuid, uuids::TypedUuid};

/// Session UUID
pub type SessionUuid = TypedUuid<SessionRecord>;

/// Session Record
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub uuid: SessionUuid,
    pub customer_uuid: CustomerUuid,
    pub created_at: Timestamp,
}

/// A session as stored, including its token verifier.
#[derive(Debug, Clone)]
pub(crate) struct StoredSession {
    pub record: SessionRecord,
    pub token_hash: String,
}

/// Session issuance result with the one-time raw bearer token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: SessionRecord,
}
