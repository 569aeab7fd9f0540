use thiserror::Error;

/// Terminal failures surfaced to the caller. Per-chart faults never reach
/// this type; they are absorbed by the report sequence as `ChartError`.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid report spec: {0}")]
    InvalidSpec(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("document finalize failed: {0}")]
    Finalize(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for RenderError {
    fn from(value: lopdf::Error) -> Self {
        RenderError::Finalize(value.to_string())
    }
}

/// Chart-local failures. The owning report sequence logs these and omits
/// the chart; the document keeps rendering.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart '{0}' has no drawable data")]
    EmptyData(String),
    #[error("series '{series}' has {values} values for {labels} labels")]
    LabelMismatch {
        series: String,
        labels: usize,
        values: usize,
    },
    #[error("series '{0}' contains a negative or non-finite value")]
    BadValue(String),
    #[error("rasterization failed: {0}")]
    Raster(String),
}
