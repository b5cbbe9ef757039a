//! Error type returned by a [`Pipeline`](crate::Pipeline) and propagated unchanged by the entry point.

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("pipeline failed: {0}")]
    Failed(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
