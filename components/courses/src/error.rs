//! Course client errors.

use thiserror::Error;

/// Failures reported to callers of the course client.
///
/// Every transport-originated variant carries the response status and the
/// transport's reason phrase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseError {
    /// The lookup yielded no record.
    #[error("course {id} not found: {status} {message}")]
    NotFound {
        /// Requested course id
        id: u32,
        /// Response status
        status: u16,
        /// Reason phrase
        message: String,
    },

    /// A mutation was answered with a non-2xx status.
    #[error("saving course {id} failed: {status} {message}")]
    SaveFailed {
        /// Course being saved
        id: u32,
        /// Response status
        status: u16,
        /// Reason phrase
        message: String,
    },

    /// A read was answered with a non-2xx status.
    #[error("request to {url} failed: {status} {message}")]
    Http {
        /// Requested URL including query string
        url: String,
        /// Response status
        status: u16,
        /// Reason phrase
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("could not decode response from {url}: {reason}")]
    Decode {
        /// Requested URL including query string
        url: String,
        /// Decoder message
        reason: String,
    },

    /// The changes could not be serialised into a request body.
    #[error("could not encode changes for course {id}: {reason}")]
    Encode {
        /// Course being saved
        id: u32,
        /// Encoder message
        reason: String,
    },
}

impl CourseError {
    /// Response status, for errors that came back from the transport.
    pub fn status(&self) -> Option<u16> {
        match self {
            CourseError::NotFound { status, .. }
            | CourseError::SaveFailed { status, .. }
            | CourseError::Http { status, .. } => Some(*status),
            CourseError::Decode { .. } | CourseError::Encode { .. } => None,
        }
    }
}
