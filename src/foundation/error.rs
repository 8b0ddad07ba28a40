/// Convenience result type used across the engine.
pub type MdlResult<T> = Result<T, MdlError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant aborts the run; nothing in the engine retries.
#[derive(thiserror::Error, Debug)]
pub enum MdlError {
    /// Malformed command arguments or invalid configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// An animation directive appeared before the directive it depends on.
    #[error("ordering error: {0}")]
    Ordering(String),

    /// A frame index outside the declared animation length.
    #[error("range error: {0}")]
    Range(String),

    /// A knob or symbol referenced but not defined.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// `pop` on a transform stack holding a single matrix.
    #[error("stack underflow: {0}")]
    StackUnderflow(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MdlError {
    /// Build a [`MdlError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MdlError::Ordering`] value.
    pub fn ordering(msg: impl Into<String>) -> Self {
        Self::Ordering(msg.into())
    }

    /// Build a [`MdlError::Range`] value.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Build a [`MdlError::Lookup`] value.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Build a [`MdlError::StackUnderflow`] value.
    pub fn stack_underflow(msg: impl Into<String>) -> Self {
        Self::StackUnderflow(msg.into())
    }

    /// Build a [`MdlError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
