//! State

use std::sync::Arc;

use sha2::{Digest, Sha256};

use salessense_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    staff_token_hash: Option<[u8; 32]>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, staff_token: Option<&str>) -> Self {
        Self {
            app,
            staff_token_hash: staff_token
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(hash_token),
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, staff_token: Option<&str>) -> Arc<Self> {
        Arc::new(Self::new(app, staff_token))
    }

    /// Whether `token` is the configured staff token. Always false when no
    /// staff token is configured.
    pub(crate) fn is_staff_token(&self, token: &str) -> bool {
        self.staff_token_hash
            .is_some_and(|expected| expected == hash_token(token))
    }
}

fn hash_token(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}
