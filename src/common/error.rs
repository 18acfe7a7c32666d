use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Error)]
pub enum HccbError {
    // Encoder
    #[error("Invalid length: expected {expected} symbols, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("Payload too large: {len} bytes, capacity {capacity} bytes")]
    PayloadTooLarge { len: usize, capacity: usize },
    #[error("No size configuration fits a {len} byte payload")]
    NoConfigurationFits { len: usize },
    #[error("Invalid symbol {0}")]
    InvalidSymbol(u16),
    #[error("Invalid color")]
    InvalidColor,

    // Error correction
    #[error("Division by zero in finite field")]
    DivisionByZero,
    #[error("Unsupported field GF(2^{0})")]
    UnsupportedField(u8),
    #[error("Invalid Reed-Solomon parameters: n {n}, k {k}")]
    InvalidCodeParameters { n: usize, k: usize },
    #[error("Too many errors to correct successfully")]
    UncorrectableError,

    // Layout
    #[error("Grid overflow: expected {expected} codeword symbols, got {got}")]
    GridOverflow { expected: usize, got: usize },
    #[error("Unknown size configuration")]
    UnknownSizeConfiguration,

    // Reader
    #[error("Invalid length header")]
    InvalidHeader,
    #[error("Sync glyph mismatch at row {row}, column {col}")]
    SyncMismatch { row: usize, col: usize },
}

pub type HccbResult<T> = Result<T, HccbError>;
