use std::error;
use std::fmt;

use crate::ErrorCode;

/// A structure to represent errors coming out of this crate.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Creates a new error with the given code and message.
    pub fn new<S: Into<String>>(code: ErrorCode, message: S) -> Error {
        Error {
            code,
            message: message.into(),
        }
    }

    /// Creates a new error from the given string as the error.
    ///
    /// The error returned will have the code `GenericError`.
    pub fn from_str(s: &str) -> Error {
        Error::new(ErrorCode::GenericError, s)
    }

    pub(crate) fn invalid_spec(spec: &str, why: &str) -> Error {
        Error::new(
            ErrorCode::InvalidSpec,
            format!("invalid range '{}': {}", spec, why),
        )
    }

    /// Return the error code associated with this error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Return the message associated with this error
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        match self.code {
            ErrorCode::GenericError => Ok(()),
            code => write!(f, "; code={:?}", code),
        }
    }
}

#[cfg(feature = "repository")]
impl From<git2::Error> for Error {
    fn from(e: git2::Error) -> Error {
        let code = match e.code() {
            git2::ErrorCode::NotFound => ErrorCode::NotFound,
            git2::ErrorCode::Ambiguous => ErrorCode::Ambiguous,
            git2::ErrorCode::InvalidSpec => ErrorCode::InvalidSpec,
            git2::ErrorCode::UnbornBranch => ErrorCode::UnbornBranch,
            _ => ErrorCode::GenericError,
        };
        Error::new(code, e.message())
    }
}
