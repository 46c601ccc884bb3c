use crate::types::Kind;
use thiserror::Error;

/// Errors surfaced by document accessors and the remote dereference path.
///
/// Every accessor reports to its immediate caller; nothing is logged,
/// swallowed, or retried inside the library.
#[derive(Debug, Error)]
pub enum ArbError {
    /// The input was not a well-formed JSON object. Wraps the underlying
    /// decoder error verbatim.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// Serialization to a sink failed (in practice only I/O failures, since
    /// the closed value set is always encodable).
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// A typed accessor ran against an absent key or a value of another kind.
    #[error("{prop} is not of type {expected}")]
    TypeMismatch { prop: String, expected: Kind },

    /// A string value failed URL syntax validation.
    #[error("{prop} is not a valid URL: {source}")]
    UrlParse {
        prop: String,
        #[source]
        source: url::ParseError,
    },

    /// The GET request could not be completed.
    #[error("GET {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The remote answered with a non-success status.
    #[error("GET {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },
}

impl ArbError {
    pub(crate) fn mismatch(prop: &str, expected: Kind) -> ArbError {
        ArbError::TypeMismatch {
            prop: prop.to_string(),
            expected,
        }
    }
}
