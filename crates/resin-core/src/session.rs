// Session context: who is calling.
//
// The models ask for the user id on demand and never hold on to it, so a
// token swapped out from under a long-lived client is picked up on the
// next call.

use async_trait::async_trait;
use resin_api::TokenStore;

use crate::error::CoreError;

/// Supplies the authenticated principal's identity.
#[async_trait]
pub trait SessionContext: Send + Sync {
    async fn user_id(&self) -> Result<u64, CoreError>;
}

/// The token store decodes the user id from the current JWT.
#[async_trait]
impl SessionContext for TokenStore {
    async fn user_id(&self) -> Result<u64, CoreError> {
        Ok(TokenStore::user_id(self)?)
    }
}

/// Fixed identity, for embedding and tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticSession {
    user_id: u64,
}

impl StaticSession {
    pub fn new(user_id: u64) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl SessionContext for StaticSession {
    async fn user_id(&self) -> Result<u64, CoreError> {
        Ok(self.user_id)
    }
}
