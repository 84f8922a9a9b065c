use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("{0}")]
    Usage(String),

    #[error("Fail to resolve {target}, {source}")]
    Resolution {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Network(#[from] io::Error),
}

impl ProbeError {
    /// Usage and resolution errors stop the run before any probe is sent.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ProbeError::Network(_))
    }

    pub fn timed_out() -> Self {
        ProbeError::Network(io::Error::new(io::ErrorKind::TimedOut, "i/o timeout"))
    }

    pub fn eof() -> Self {
        ProbeError::Network(io::Error::new(io::ErrorKind::UnexpectedEof, "EOF"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_are_not_fatal() {
        assert!(!ProbeError::timed_out().is_fatal());
        assert!(ProbeError::Usage("missing host".into()).is_fatal());
        let err = ProbeError::Resolution {
            target: "nowhere.invalid".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such host"),
        };
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "Fail to resolve nowhere.invalid, no such host");
    }
}
