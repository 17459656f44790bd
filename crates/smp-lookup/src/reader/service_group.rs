//! Service group documents.

use tracing::{debug, warn};

use crate::error::{LookupError, LookupResult};
use crate::href::parse_reference_href;
use crate::identifier::DocumentTypeIdentifier;
use crate::schema::bind_service_group;

pub(super) fn parse_document_identifiers(
    bytes: &[u8],
) -> LookupResult<Vec<DocumentTypeIdentifier>> {
    let group = bind_service_group(bytes)?;
    let references = group.references.map(|c| c.references).unwrap_or_default();

    let mut identifiers = Vec::with_capacity(references.len());
    for reference in &references {
        match parse_reference_href(&reference.href) {
            Ok(identifier) => identifiers.push(identifier),
            Err(LookupError::MalformedReference { href, reason }) => {
                warn!(%href, %reason, "skipping service metadata reference");
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        references = references.len(),
        identifiers = identifiers.len(),
        "parsed service group"
    );
    Ok(identifiers)
}
