//! X.509 certificates embedded in service metadata.
//!
//! Only extraction happens here. Trust-chain validation is the caller's concern.

use std::fmt;

use x509_parser::nom;

use crate::error::CertificateError;

/// A parsed X.509 certificate.
///
/// Holds the DER encoding; the parsed view is borrowed from it on demand.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Certificate {
    der: Vec<u8>,
    subject: String,
    issuer: String,
    serial: String,
}

impl Certificate {
    /// Decode a DER X.509 certificate.
    pub fn from_der(der: &[u8]) -> Result<Self, CertificateError> {
        if der.is_empty() {
            return Err(CertificateError::Empty);
        }

        let (rem, cert) = x509_parser::parse_x509_certificate(der).map_err(|e| match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => CertificateError::Decode(e),
            nom::Err::Incomplete(_) => {
                CertificateError::Decode(x509_parser::error::X509Error::InvalidCertificate)
            }
        })?;

        if !rem.is_empty() {
            return Err(CertificateError::TrailingData { len: rem.len() });
        }

        Ok(Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            serial: cert.tbs_certificate.raw_serial_as_string(),
            der: der.to_vec(),
        })
    }

    /// DER encoding, as found in the document.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Serial number as colon-separated hex.
    pub fn serial(&self) -> &str {
        &self.serial
    }
}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Certificate")
            .field("subject", &self.subject)
            .field("issuer", &self.issuer)
            .field("serial", &self.serial)
            .finish()
    }
}

impl TryFrom<&[u8]> for Certificate {
    type Error = CertificateError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_der(bytes)
    }
}

/// Decode DER bytes into a certificate.
pub fn to_certificate(bytes: &[u8]) -> Result<Certificate, CertificateError> {
    Certificate::from_der(bytes)
}
