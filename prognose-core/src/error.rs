use thiserror::Error;

/// Unified error type for the prognose workspace.
///
/// This wraps request-validation failures, configuration problems, violated
/// table invariants, and failures surfaced unchanged from the external
/// collaborators. Data absence is deliberately *not* represented here: an
/// empty source yields an empty [`crate::TimeTable`], never an error.
#[derive(Debug, Error)]
pub enum PrognoseError {
    /// The request is structurally valid but the wiring cannot satisfy it
    /// (e.g. weather data requested without a location).
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input argument (unknown predictor group, unparseable
    /// resolution, inverted window).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Violated table invariants (non-ascending index, column length
    /// mismatch, duplicate column names within one table).
    #[error("data issue: {0}")]
    Data(String),

    /// An external collaborator failed. The aggregation core neither retries
    /// nor suppresses these; retry policy belongs to the collaborator or the
    /// caller.
    #[error("{collaborator} failed: {msg}")]
    Source {
        /// Collaborator name that failed.
        collaborator: String,
        /// Human-readable error message.
        msg: String,
    },
}

impl PrognoseError {
    /// Helper: build a `Config` error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build a `Data` error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Helper: build a `Source` error with the collaborator name and message.
    pub fn source(collaborator: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            collaborator: collaborator.into(),
            msg: msg.into(),
        }
    }
}
