use thiserror::Error;

/// Input-contract violations found while rendering.
///
/// These are never produced for well-formed evaluator output; they mean the
/// collaborator handed over a structure the renderers refuse to guess about.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("check '{key}' is conditional but carries no caveat evaluation info")]
    MissingCaveatInfo { key: String },

    #[error("check '{key}' is granted but names neither sub-traces nor subjects")]
    MissingTraceDetail { key: String },

    #[error("expansion node '{node}' has neither intermediate nor leaf content")]
    MissingTreeType { node: String },

    #[error("invalid evaluator JSON: {0}")]
    Json(#[from] serde_json::Error),
}
