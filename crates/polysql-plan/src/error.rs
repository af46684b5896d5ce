//! Error types for plan decoding.

/// Errors that can occur while decoding or encoding a plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The JSON document does not have the common plan shape.
    #[error("Invalid plan JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The vendor output format has no decoder yet.
    #[error("not yet implemented: {0} plan parsing")]
    Unsupported(&'static str),

    /// The format name is not recognized.
    #[error("Unknown plan format '{0}' (expected json, xml or text)")]
    UnknownFormat(String),
}
