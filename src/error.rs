//! Domain and seam error types.
//!
//! Construction-time invalid input (negative durations, out-of-range
//! timestamps, malformed skyline blocks, ...) is fatal and modeled by
//! [`DomainError`]. Failures from the external fetch/metadata/write seams
//! are modeled by [`SeamError`] and propagate to the process exit code; they
//! never originate from the scheduling algorithm itself.

/// Result type for value-object construction and tracker commits.
pub type DomainResult<T> = Result<T, DomainError>;

/// Error type for invalid domain values and tracker preconditions.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("duration subtraction would be negative: {minuend} - {subtrahend}")]
    NegativeDuration { minuend: u64, subtrahend: u64 },

    #[error("timestamp subtraction would be negative: {minuend} - {subtrahend}")]
    NegativeTimestamp { minuend: u64, subtrahend: u64 },

    #[error("unixtime {0} is beyond the year-3000 sentinel")]
    TimestampOutOfRange(u64),

    #[error("skyline block duration must be positive, got {0}")]
    NonPositiveBlockDuration(u64),

    #[error("skyline block size must be non-negative, got {0}")]
    NegativeBlockSize(f64),

    #[error("unique task offset {offset} seconds is not less than a day ({day} seconds)")]
    OffsetNotWithinDay { offset: u64, day: u64 },

    #[error("max_start ({max_start}) must be >= min_start ({min_start})")]
    MaxStartBeforeMinStart { min_start: u64, max_start: u64 },

    #[error("memory amount must be non-negative, got {0}")]
    NegativeMemory(f64),

    #[error("skyline tracker bounds exceeded at bin {bin}: {value} not in [0, {max_size}]")]
    BoundsExceeded { bin: u64, value: f64, max_size: f64 },

    #[error("invalid memory literal: {0}")]
    InvalidMemoryLiteral(String),
}

/// Result type for the external seams (fetcher, metadata provider, writer).
pub type SeamResult<T> = Result<T, SeamError>;

/// Error type for the collaborators the core does not own.
#[derive(Debug, thiserror::Error)]
pub enum SeamError {
    #[error("task fetch failed: {0}")]
    Fetch(String),

    #[error("metadata fetch failed for pool {pool}: {source}")]
    Metadata { pool: String, source: String },

    #[error("plan write failed: {0}")]
    Write(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("unknown registry name: {0}")]
    UnknownName(String),
}

impl From<DomainError> for SeamError {
    fn from(e: DomainError) -> Self {
        SeamError::Configuration(e.to_string())
    }
}
