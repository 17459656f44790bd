//! Signature verification seam.
//!
//! XML-DSig validation lives outside this crate. Readers hand the verifier the
//! whole parsed document and trust nothing inside it until it returns.

use crate::certificate::Certificate;
use crate::document::XmlDocument;
use crate::error::SecurityError;

/// Verifies the enveloped signature of a signed document.
pub trait SignatureVerifier: Send + Sync {
    /// Verify the signature over `document`, returning the signing certificate.
    fn verify(&self, document: &XmlDocument) -> Result<Certificate, SecurityError>;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&XmlDocument) -> Result<Certificate, SecurityError> + Send + Sync,
{
    fn verify(&self, document: &XmlDocument) -> Result<Certificate, SecurityError> {
        self(document)
    }
}

/// Verifier for readers that never accept signed documents.
///
/// Every signed document fails verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectSigned;

impl SignatureVerifier for RejectSigned {
    fn verify(&self, _document: &XmlDocument) -> Result<Certificate, SecurityError> {
        Err(SecurityError::signature_invalid(
            "no signature verifier configured",
        ))
    }
}
