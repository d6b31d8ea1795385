use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("a curve needs at least 2 control points, got {found}")]
    TooFewPoints { found: usize },
}

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to parse layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid layout: {0}")]
    InvalidCurve(#[from] CurveError),
}
