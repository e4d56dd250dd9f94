pub type CollageResult<T> = Result<T, CollageError>;

#[derive(thiserror::Error, Debug)]
pub enum CollageError {
    #[error("config error: {0}")]
    Config(String),

    #[error("no such user exists: {0}")]
    UserNotFound(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("empty result: {0}")]
    EmptyResult(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CollageError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn user_not_found(username: impl Into<String>) -> Self {
        Self::UserNotFound(username.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn empty_result(msg: impl Into<String>) -> Self {
        Self::EmptyResult(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            CollageError::config("x")
                .to_string()
                .contains("config error:")
        );
        assert!(
            CollageError::user_not_found("alice")
                .to_string()
                .contains("no such user exists: alice")
        );
        assert!(CollageError::fetch("x").to_string().contains("fetch error:"));
        assert!(
            CollageError::empty_result("x")
                .to_string()
                .contains("empty result:")
        );
        assert!(
            CollageError::decode("x")
                .to_string()
                .contains("decode error:")
        );
        assert!(
            CollageError::encode("x")
                .to_string()
                .contains("encode error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = CollageError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
