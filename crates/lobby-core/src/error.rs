/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while validating static scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The walkable area is empty, inverted, or not finite.
    #[error("invalid walkable area: {0}")]
    InvalidArea(String),

    /// Two interactive objects share the same identifier.
    #[error("duplicate object id: \"{0}\"")]
    DuplicateObject(String),

    /// An object's interaction point lies outside the walkable area.
    #[error("object \"{id}\" has an interaction point outside the walkable area")]
    UnreachableObject {
        /// The offending object id.
        id: String,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
