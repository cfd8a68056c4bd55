//! The hub's only ingress is the message bus, so identity always comes
//! from a field already parsed out of the decoded message body, rather
//! than an HTTP header.

use crate::application::common::identity_provider::{IdentityError, IdentityProvider};
use crate::domain::identifiers::UserId;
use async_trait::async_trait;

/// Resolves to a `UserId` fixed at construction time — the
/// message-consumer/task-executor boundary extracts `user_id` from the
/// incoming payload once and builds one of these per request.
pub struct MessageIdentityProvider {
    user_id: Option<UserId>,
}

impl MessageIdentityProvider {
    #[must_use]
    pub fn new(user_id: Option<UserId>) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl IdentityProvider for MessageIdentityProvider {
    async fn user_id(&self) -> Result<UserId, IdentityError> {
        self.user_id.ok_or(IdentityError::Missing)
    }
}
