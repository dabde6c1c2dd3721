use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for dotmap operations.
///
/// Path resolution and mutation are total functions and never error; the only
/// fallible surface is the JSON interchange, so the kinds are few.
///
/// # Examples
///
/// ```rust,ignore
/// use dotmap::errors::{CollectionError, CollectionResult, ErrorKind};
///
/// fn example() -> CollectionResult<()> {
///     Err(CollectionError::new("malformed document", ErrorKind::ParseError))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// Error parsing a text representation into a collection
    ParseError,
    /// Error encoding a collection into a text representation
    EncodingError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ParseError => write!(f, "Parse error"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
        }
    }
}

/// Custom dotmap error type.
///
/// `CollectionError` encapsulates the error message, kind, and an optional
/// cause, supporting error chaining through [`Error::source`].
///
/// # Type alias
///
/// The `CollectionResult<T>` type alias is equivalent to
/// `Result<T, CollectionError>` and is used by every fallible operation.
#[derive(Clone)]
pub struct CollectionError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<CollectionError>>,
}

impl CollectionError {
    /// Creates a new `CollectionError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        CollectionError {
            message: message.to_string(),
            error_kind,
            cause: None,
        }
    }

    /// Creates a new `CollectionError` with a cause error.
    ///
    /// The cause is preserved in the chain and reachable through
    /// [`Error::source`].
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: CollectionError) -> Self {
        CollectionError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&CollectionError> {
        self.cause.as_deref()
    }
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}\nCaused by: {:?}", self.error_kind, self.message, cause),
            None => write!(f, "{}: {}", self.error_kind, self.message),
        }
    }
}

impl Error for CollectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for CollectionError {
    fn from(err: serde_json::Error) -> Self {
        CollectionError::new(&err.to_string(), ErrorKind::EncodingError)
    }
}

/// A result type alias for dotmap operations.
///
/// `CollectionResult<T>` is shorthand for `Result<T, CollectionError>`.
pub type CollectionResult<T> = Result<T, CollectionError>;
