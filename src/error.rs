use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("failed to allocate {bytes} bytes for benchmark buffer")]
    Allocation { bytes: usize },
    #[error("invalid buffer layout: {0}")]
    Layout(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("serial fraction {0} is outside [0, 1]")]
    ScalingFraction(f64),
    #[error("report io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("report encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BenchResult<T> = Result<T, BenchError>;
