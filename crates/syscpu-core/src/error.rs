//! Errors surfaced by a sampling cycle.

use std::io;

/// Failure of a single sampling cycle.
///
/// Only the native counter path can fail; the computed path degrades to
/// absent or zero readings instead.
#[derive(Debug)]
pub enum SampleError {
    /// The OS aggregate counter could not be created. The next cycle retries.
    CounterInit(io::Error),
    /// An existing counter handle failed to produce a value.
    CounterRead(io::Error),
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CounterInit(err) => write!(f, "failed to create native CPU counter: {err}"),
            Self::CounterRead(err) => write!(f, "failed to read native CPU counter: {err}"),
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CounterInit(err) | Self::CounterRead(err) => Some(err),
        }
    }
}

impl From<io::Error> for SampleError {
    fn from(err: io::Error) -> Self {
        Self::CounterRead(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_names_the_phase() {
        let init = SampleError::CounterInit(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(init.to_string(), "failed to create native CPU counter: gone");
        let read: SampleError = io::Error::other("eof").into();
        assert!(matches!(read, SampleError::CounterRead(_)));
        assert_eq!(read.source().map(ToString::to_string).as_deref(), Some("eof"));
    }
}
