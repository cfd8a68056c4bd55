//! Resolves "who is the current user" for a command. The identity
//! always comes from the ingress message body rather than an HTTP
//! header, since the hub's only ingress is the message bus.

use crate::domain::identifiers::UserId;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("message carried no resolvable user id")]
    Missing,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn user_id(&self) -> Result<UserId, IdentityError>;
}
