use thiserror::Error;

/// The asset request completed with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to load SVG: {status}")]
pub struct LoadError {
    pub status: u16,
}

/// The fetched text could not be turned into a mountable SVG root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No SVG element found")]
    NoRootElement,
    #[error("malformed SVG markup at byte {position}: {message}")]
    Malformed { position: u64, message: String },
}

/// Anything that stops the stage from being mounted.
///
/// The page never distinguishes these to the user: all of them end in the
/// same fallback message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RevealError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// An exception raised by the host while fetching or mounting.
    #[error("host error: {0}")]
    Host(String),
}
