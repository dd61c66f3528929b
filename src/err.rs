#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirError {
    /// A run this short never reaches the drain phase: the first
    /// `PRIMING_DEPTH` positions only fill the pipeline.
    #[error("data_len {data_len} too short, need at least {min}")]
    DataLenTooShort { data_len: usize, min: usize },
    #[error("expected {expected} tap coefficients, got {actual}")]
    TapCountMismatch { expected: usize, actual: usize },
    #[error("streaming requested before configure()")]
    NotConfigured,
    #[error("timed out polling the accelerator control register")]
    Timeout,
}
