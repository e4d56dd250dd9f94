use crate::{config::ClientConfig, foundation::error::CollageResult, transport::HttpTransport};

/// Pre-flight check that a username exists on the catalog.
pub struct UserValidator<'a, T: HttpTransport> {
    config: &'a ClientConfig,
    transport: &'a T,
}

impl<'a, T: HttpTransport> UserValidator<'a, T> {
    pub fn new(config: &'a ClientConfig, transport: &'a T) -> Self {
        Self { config, transport }
    }

    /// `true` on a success status, `false` on any other status.
    ///
    /// A service error therefore reads as "user not found". Only a request that got no
    /// response at all is an `Err`.
    #[tracing::instrument(skip(self))]
    pub fn exists(&self, username: &str) -> CollageResult<bool> {
        let response = self.transport.get(&self.config.user_url(username), &[])?;
        tracing::debug!(status = response.status, "user lookup");
        Ok(response.is_success())
    }
}
