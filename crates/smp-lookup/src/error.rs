//! Error types for SMP response readers.

use x509_parser::error::X509Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// A service group reference href does not carry `scheme::value` after `/services/`.
    ///
    /// Readers recover from this per entry; it never aborts a service group parse.
    #[error("malformed reference: {href} - {reason}")]
    MalformedReference { href: String, reason: String },

    /// Document does not conform to a known schema shape.
    #[error("binding failed: {message}")]
    Binding {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Response stream could not be read.
    #[error("failed to read response: {0}")]
    Io(#[from] std::io::Error),

    /// Response body exceeded the configured limit.
    #[error("response exceeds {limit} bytes")]
    ResponseTooLarge { limit: u64 },

    /// Signature on a signed document could not be verified.
    #[error(transparent)]
    Security(#[from] SecurityError),

    /// Embedded certificate is not valid DER X.509.
    #[error(transparent)]
    CertificateDecode(#[from] CertificateError),
}

impl LookupError {
    /// Binding failure without an underlying cause.
    pub fn binding(message: impl Into<String>) -> Self {
        Self::Binding {
            message: message.into(),
            source: None,
        }
    }

    /// Binding failure wrapping the cause reported by the parser.
    pub fn binding_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Binding {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the error only invalidates a single entry of a larger document.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedReference { .. })
    }

    /// Whether the error must be handled under the caller's trust policy.
    pub fn is_security(&self) -> bool {
        matches!(self, Self::Security(_))
    }
}

impl From<quick_xml::DeError> for LookupError {
    fn from(err: quick_xml::DeError) -> Self {
        Self::binding_with(format!("schema mismatch: {}", err), err)
    }
}

impl From<quick_xml::Error> for LookupError {
    fn from(err: quick_xml::Error) -> Self {
        Self::binding_with(format!("malformed XML: {}", err), err)
    }
}

/// Signature verification errors.
#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    /// The signature did not validate over the document.
    #[error("signature verification failed: {reason}")]
    SignatureInvalid { reason: String },

    /// Document is unsigned but the reader requires signed metadata.
    #[error("service metadata is unsigned")]
    Unsigned,

    /// The verifier itself failed.
    #[error("signature verifier failed: {message}")]
    Verifier {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl SecurityError {
    pub fn signature_invalid(reason: impl Into<String>) -> Self {
        Self::SignatureInvalid {
            reason: reason.into(),
        }
    }
}

/// Certificate decoding errors.
#[derive(Debug, thiserror::Error)]
pub enum CertificateError {
    /// No bytes to decode.
    #[error("certificate is empty")]
    Empty,

    /// Bytes are not a DER X.509 certificate.
    #[error("invalid X.509 certificate: {0}")]
    Decode(#[source] X509Error),

    /// Embedded certificate text is not valid base64.
    #[error("invalid certificate encoding: {0}")]
    Encoding(#[source] base64::DecodeError),

    /// Bytes continue past the end of the certificate.
    #[error("{len} trailing bytes after certificate")]
    TrailingData { len: usize },
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;
