//! Readers for SMP responses.
//!
//! Public API: [`MetadataReader`] and its BDXR implementation. Document shape
//! handling lives in the submodules.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::ReaderConfig;
use crate::error::LookupResult;
use crate::identifier::DocumentTypeIdentifier;
use crate::model::ServiceMetadata;
use crate::response::FetcherResponse;
use crate::verifier::SignatureVerifier;

mod service_group;
mod service_metadata;
mod signed;

/// Turns fetched SMP responses into domain objects.
pub trait MetadataReader {
    /// Document types listed in a service group, in document order.
    ///
    /// References whose href does not decode to `scheme::value` are skipped.
    fn parse_document_identifiers(
        &self,
        response: FetcherResponse,
    ) -> LookupResult<Vec<DocumentTypeIdentifier>>;

    /// Service metadata, verified first when the document is signed.
    fn parse_service_metadata(&self, response: FetcherResponse) -> LookupResult<ServiceMetadata>;
}

/// Reader for OASIS BDXR SMP documents (2014-07 and 2016-05).
///
/// Construct once and share; parsing takes `&self` and keeps no state
/// between calls.
#[derive(Clone)]
pub struct BdxrReader {
    config: ReaderConfig,
    verifier: Arc<dyn SignatureVerifier>,
}

impl BdxrReader {
    pub fn new(config: ReaderConfig, verifier: impl SignatureVerifier + 'static) -> Self {
        Self::with_shared_verifier(config, Arc::new(verifier))
    }

    /// Reader sharing a verifier with other components.
    pub fn with_shared_verifier(
        config: ReaderConfig,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Self {
        debug!(
            max_response_bytes = config.max_response_bytes,
            require_signature = config.require_signature,
            "creating BDXR reader"
        );
        Self { config, verifier }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

impl fmt::Debug for BdxrReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BdxrReader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MetadataReader for BdxrReader {
    fn parse_document_identifiers(
        &self,
        response: FetcherResponse,
    ) -> LookupResult<Vec<DocumentTypeIdentifier>> {
        debug!(declared_namespace = ?response.namespace(), "reading service group");
        let bytes = response.into_bytes(self.config.max_response_bytes)?;
        service_group::parse_document_identifiers(&bytes)
    }

    fn parse_service_metadata(&self, response: FetcherResponse) -> LookupResult<ServiceMetadata> {
        debug!(declared_namespace = ?response.namespace(), "reading service metadata");
        let bytes = response.into_bytes(self.config.max_response_bytes)?;
        service_metadata::parse_service_metadata(bytes, self.verifier.as_ref(), &self.config)
    }
}
