//! Caller identity via STS `GetCallerIdentity`.

use async_trait::async_trait;
use aws_sdk_sts::Client;
use aws_sdk_sts::error::DisplayErrorContext;
use corechat_core::error::IdentityError;
use corechat_core::identity::IdentitySource;

/// Resolves the caller's `UserId` from the ambient AWS credentials.
pub struct StsIdentity {
    client: Client,
}

impl StsIdentity {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentitySource for StsIdentity {
    async fn caller_user_id(&self) -> Result<String, IdentityError> {
        let output = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(DisplayErrorContext(&e).to_string()))?;

        output
            .user_id()
            .map(str::to_string)
            .ok_or(IdentityError::MissingUserId)
    }
}
