//! Fetched SMP responses.

use std::fmt;
use std::io::{Cursor, Read};

use crate::error::{LookupError, LookupResult};

/// A response handed over by the fetcher.
///
/// The body stream is drained exactly once by whichever reader consumes it.
pub struct FetcherResponse {
    body: Box<dyn Read + Send>,
    namespace: Option<String>,
}

impl FetcherResponse {
    pub fn new(body: impl Read + Send + 'static) -> Self {
        Self {
            body: Box::new(body),
            namespace: None,
        }
    }

    /// Response backed by an in-memory body.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(bytes.into()))
    }

    /// Attach the document namespace the fetcher declared.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Drain the body, failing once it grows past `limit` bytes.
    pub(crate) fn into_bytes(self, limit: u64) -> LookupResult<Vec<u8>> {
        let mut bytes = Vec::new();
        // One extra byte tells "exactly at the limit" from "over it".
        self.body
            .take(limit.saturating_add(1))
            .read_to_end(&mut bytes)?;

        if bytes.len() as u64 > limit {
            return Err(LookupError::ResponseTooLarge { limit });
        }
        Ok(bytes)
    }
}

impl fmt::Debug for FetcherResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetcherResponse")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "peer went away",
            ))
        }
    }

    #[test]
    fn test_drains_body_within_limit() {
        let response = FetcherResponse::from_bytes("<ServiceGroup/>");
        assert_eq!(response.into_bytes(15).unwrap(), b"<ServiceGroup/>");
    }

    #[test]
    fn test_rejects_body_over_limit() {
        let response = FetcherResponse::from_bytes("<ServiceGroup/>");
        let err = response.into_bytes(14).unwrap_err();
        assert!(matches!(err, LookupError::ResponseTooLarge { limit: 14 }));
    }

    #[test]
    fn test_read_failure_is_io() {
        let err = FetcherResponse::new(FailingReader).into_bytes(1024).unwrap_err();
        assert!(matches!(err, LookupError::Io(_)));
    }

    #[test]
    fn test_namespace_is_kept() {
        let response = FetcherResponse::from_bytes(Vec::new())
            .with_namespace(crate::namespace::NAMESPACE_201605);
        assert_eq!(response.namespace(), Some(crate::namespace::NAMESPACE_201605));
    }
}
