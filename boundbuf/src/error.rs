use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The channel is closed, or was closed while the caller waited.
    Closed,
    /// The underlying queue failed; see [`Error::cause`].
    Generic,
    /// `destroy` was called on a channel that is still open.
    Destroy,
    InvalidCapacity,
    Allocation,
    EmptyMessage,
    QueueFull,
    QueueEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    cause: Option<ErrorKind>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Error { kind, cause: None }
    }

    /// Wraps a queue failure into a generic channel error.
    pub fn generic(cause: ErrorKind) -> Self {
        Error {
            kind: ErrorKind::Generic,
            cause: Some(cause),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn cause(&self) -> Option<ErrorKind> {
        self.cause
    }

    pub fn is_closed(&self) -> bool {
        self.kind == ErrorKind::Closed
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Closed => write!(f, "Channel closed"),
            ErrorKind::Generic => write!(f, "Generic buffer error"),
            ErrorKind::Destroy => write!(f, "Cannot destroy an open channel"),
            ErrorKind::InvalidCapacity => write!(f, "Invalid capacity"),
            ErrorKind::Allocation => write!(f, "Allocation failed"),
            ErrorKind::EmptyMessage => write!(f, "Empty message"),
            ErrorKind::QueueFull => write!(f, "Queue full"),
            ErrorKind::QueueEmpty => write!(f, "Queue empty"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cause {
            Some(cause) => write!(f, "{} ({})", self.kind, cause),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Error::new(ErrorKind::Closed)), "Channel closed");
        assert_eq!(
            format!("{}", Error::generic(ErrorKind::QueueFull)),
            "Generic buffer error (Queue full)"
        );
    }

    #[test]
    fn test_generic_keeps_cause() {
        let err = Error::generic(ErrorKind::QueueEmpty);
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.cause(), Some(ErrorKind::QueueEmpty));
        assert!(!err.is_closed());
        assert!(Error::from(ErrorKind::Closed).is_closed());
    }
}
