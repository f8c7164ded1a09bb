use std::{fmt, io};

use bincode::error::{DecodeError, EncodeError};

#[derive(Debug)]
pub enum SimError {
    /// The config can't describe a runnable simulation; e.g. a non-positive smoothing radius.
    InvalidConfiguration(String),
    /// A particle's position or velocity went non-finite.
    UnstableSimulation { particle: usize },
    Io(io::Error),
    Encode(EncodeError),
    Decode(DecodeError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::UnstableSimulation { particle } => {
                write!(f, "Unstable simulation: particle {particle} is NaN or infinite")
            }
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Encode(e) => write!(f, "Encoding failed: {e}"),
            Self::Decode(e) => write!(f, "Decoding failed: {e}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SimError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<EncodeError> for SimError {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

impl From<DecodeError> for SimError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}
