/// Convenience result type used across the crate.
pub type PatchResult<T> = Result<T, PatchError>;

/// Error taxonomy for patch construction and output.
#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    /// A connection-list argument was not an outlet or a list of outlets.
    #[error("malformed connection: {0}")]
    MalformedConnection(String),

    /// A node handle issued by a different patch was used as an endpoint.
    #[error("foreign node: {0}")]
    ForeignNode(String),

    /// Invalid JSON patch description.
    #[error("description error: {0}")]
    Description(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PatchError {
    /// Build a [`PatchError::MalformedConnection`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedConnection(msg.into())
    }

    /// Build a [`PatchError::ForeignNode`] value.
    pub fn foreign(msg: impl Into<String>) -> Self {
        Self::ForeignNode(msg.into())
    }

    /// Build a [`PatchError::Description`] value.
    pub fn description(msg: impl Into<String>) -> Self {
        Self::Description(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
