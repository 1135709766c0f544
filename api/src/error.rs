use thiserror::Error;

/// Everything that can abort a single pricing request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GdaError {
    /// A required named argument was not supplied.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// The operation name is not one of the four supported ones.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// An argument name the oracle does not know.
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    /// An argument value that is not a base-10 unsigned integer.
    #[error("invalid number for {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    /// Inputs outside the model's domain (α ≤ 1, negative values, fractional counts).
    #[error("domain violation: {0}")]
    DomainViolation(String),

    /// An intermediate value left the working range.
    #[error("arithmetic overflow while computing {0}")]
    ArithmeticOverflow(&'static str),

    /// The final price does not fit an unsigned 256-bit integer.
    #[error("price exceeds the unsigned 256-bit range")]
    EncodingOverflow,
}

pub type GdaResult<T> = Result<T, GdaError>;
