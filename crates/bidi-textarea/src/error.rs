use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failures reported by an [`EditableSurface`](crate::EditableSurface) implementation.
///
/// The widget never surfaces these to its caller: the in-memory document stays authoritative
/// and the failure is logged.
pub enum SurfaceError {
    #[error("surface is detached from its host")]
    /// The host no longer renders this surface.
    Detached,

    #[error("surface rejected the update: {0}")]
    /// The host refused a tree or caret update.
    Rejected(String),
}

#[derive(Debug, Error)]
/// Errors produced while loading [`TextAreaOptions`](crate::TextAreaOptions).
pub enum OptionsError {
    #[error("invalid options JSON: {0}")]
    /// The options document is not valid JSON or has the wrong shape.
    Json(#[from] serde_json::Error),
}
