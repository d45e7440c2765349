use thiserror::Error;

/// Fatal decode failure.
///
/// In the default mode the decoder has no recoverable errors: every anomaly
/// resolves to a deterministic repair and the only "failure" is an empty
/// result for empty input. Errors therefore come from exactly two places:
/// strict mode refusing a repair, and the I/O layer underneath file inputs.
#[derive(Debug, Error)]
pub enum RepairError {
    /// Strict mode hit an anomaly that the default mode would have repaired.
    #[error("{reason} at position {position}")]
    Strict {
        /// The repair that was refused, named the way the log would name it.
        reason: &'static str,
        /// Character offset at which the anomaly was detected.
        position: usize,
    },
    /// Nesting exceeded [`Options::max_depth`](crate::Options::max_depth)
    /// while strict mode was on.
    #[error("nesting exceeded {limit} levels at position {position}")]
    DepthExceeded { limit: usize, position: usize },
    /// Propagated from the file collaborator; never produced by the parser.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RepairError {
    /// Character offset of the failure, when the failure has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            RepairError::Strict { position, .. } => Some(*position),
            RepairError::DepthExceeded { position, .. } => Some(*position),
            RepairError::Io(_) => None,
        }
    }
}
