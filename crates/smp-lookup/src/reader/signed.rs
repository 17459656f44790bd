//! Signed wrapper detection and verification.

use tracing::debug;

use crate::certificate::Certificate;
use crate::document::{DocumentShape, XmlDocument};
use crate::error::{LookupError, LookupResult};
use crate::schema::{bind_service_metadata, bind_signed_service_metadata, ServiceMetadataType};
use crate::verifier::SignatureVerifier;

/// Metadata payload plus the certificate that signed it, if any.
#[derive(Debug)]
pub(super) struct Unwrapped {
    pub metadata: ServiceMetadataType,
    pub signer: Option<Certificate>,
}

/// Bind the document, verifying it first when the root is the signed wrapper.
///
/// A signed document that fails verification is a security error even when
/// its content would not bind.
pub(super) fn unwrap_metadata(
    doc: &XmlDocument,
    verifier: &dyn SignatureVerifier,
) -> LookupResult<Unwrapped> {
    let shape = doc.shape();
    debug!(
        root = %doc.root().qualified_name,
        namespace = ?doc.root().smp_namespace(),
        ?shape,
        "classified service metadata document"
    );

    match shape {
        DocumentShape::SignedServiceMetadata => {
            // Verification covers the document as received, wrapper included,
            // and runs before any of the signed content is bound.
            let signer = verifier.verify(doc)?;
            debug!(signer = %signer.subject(), "signature verified");
            let signed = bind_signed_service_metadata(doc)?;
            Ok(Unwrapped {
                metadata: signed.service_metadata,
                signer: Some(signer),
            })
        }
        DocumentShape::ServiceMetadata => Ok(Unwrapped {
            metadata: bind_service_metadata(doc)?,
            signer: None,
        }),
        DocumentShape::ServiceGroup => Err(LookupError::binding(
            "expected service metadata, got a service group",
        )),
    }
}
