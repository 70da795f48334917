/// Convenience result type used across scenelink.
pub type LinkResult<T> = Result<T, LinkError>;

/// Top-level error taxonomy used by the core and host bindings.
#[derive(thiserror::Error, Debug)]
pub enum LinkError {
    /// Malformed timeline, strip or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced timeline, strip or camera no longer exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// The host binding refused or failed a command.
    #[error("host error: {0}")]
    Host(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LinkError {
    /// Build a [`LinkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LinkError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`LinkError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`LinkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for dangling references, which the core treats as a silent no-op.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<serde_json::Error> for LinkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
