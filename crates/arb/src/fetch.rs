//! HTTP side of the remote dereference path.
//!
//! A single unconditional GET per call: no custom headers, no retry, no
//! redirect-policy override beyond the agent default, and no caching.

use crate::{Arb, ArbError};
use std::time::Duration;
use url::Url;

/// Fetch a remote document and decode its body.
///
/// With `timeout` set, the whole request runs on a per-call agent carrying
/// that overall deadline; otherwise the default agent settings apply.
/// Non-2xx responses are reported as [`ArbError::HttpStatus`].
pub(crate) fn fetch_arb(url: &Url, timeout: Option<Duration>) -> Result<Arb, ArbError> {
    let request = match timeout {
        Some(deadline) => ureq::builder().timeout(deadline).build().get(url.as_str()),
        None => ureq::get(url.as_str()),
    };
    let response = request.call().map_err(|err| match err {
        ureq::Error::Status(status, _) => ArbError::HttpStatus {
            url: url.to_string(),
            status,
        },
        transport => ArbError::Http {
            url: url.to_string(),
            source: Box::new(transport),
        },
    })?;
    Arb::read(response.into_reader())
}
