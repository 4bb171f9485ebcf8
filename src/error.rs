/// Convenience result type used across charcoal.
pub type CharcoalResult<T> = Result<T, CharcoalError>;

/// Top-level error taxonomy used by the library APIs.
#[derive(thiserror::Error, Debug)]
pub enum CharcoalError {
    /// Source image cannot be decoded or has zero area.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Parameter outside its allowed domain (even or zero blur kernel,
    /// zero contrast). Treated as a caller bug: fail fast, no partial output.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Filesystem read/write failure at the codec boundary.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CharcoalError {
    /// Build a [`CharcoalError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`CharcoalError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`CharcoalError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            CharcoalError::invalid_input("x")
                .to_string()
                .contains("invalid input:")
        );
        assert!(
            CharcoalError::invalid_parameter("x")
                .to_string()
                .contains("invalid parameter:")
        );
        assert!(CharcoalError::io("x").to_string().contains("io error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = CharcoalError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
