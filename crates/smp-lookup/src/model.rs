//! Domain objects produced by the readers.

use url::Url;

use crate::certificate::Certificate;
use crate::identifier::{
    DocumentTypeIdentifier, ParticipantIdentifier, ProcessIdentifier, TransportProfile,
};

/// A published address for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Process this endpoint serves.
    pub process_identifier: ProcessIdentifier,

    /// Wire protocol the endpoint speaks.
    pub transport_profile: TransportProfile,

    /// Endpoint address.
    pub address: Url,

    /// Endpoint certificate, when the document embeds one.
    pub certificate: Option<Certificate>,
}

impl Endpoint {
    pub fn of(
        process_identifier: ProcessIdentifier,
        transport_profile: TransportProfile,
        address: Url,
        certificate: Option<Certificate>,
    ) -> Self {
        Self {
            process_identifier,
            transport_profile,
            address,
            certificate,
        }
    }
}

/// Service metadata for one participant and document type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetadata {
    pub participant_identifier: ParticipantIdentifier,

    pub document_type_identifier: DocumentTypeIdentifier,

    /// Endpoints in (process, endpoint) document order.
    pub endpoints: Vec<Endpoint>,

    /// Certificate that validated the signature over the whole document.
    ///
    /// `None` means the document was not signed, so verification did not apply.
    pub signer: Option<Certificate>,
}

impl ServiceMetadata {
    pub fn of(
        participant_identifier: ParticipantIdentifier,
        document_type_identifier: DocumentTypeIdentifier,
        endpoints: Vec<Endpoint>,
        signer: Option<Certificate>,
    ) -> Self {
        Self {
            participant_identifier,
            document_type_identifier,
            endpoints,
            signer,
        }
    }

    /// Whether the metadata came from a verified signed document.
    pub fn is_signed(&self) -> bool {
        self.signer.is_some()
    }

    /// Endpoints for a process, optionally narrowed to transport profiles.
    ///
    /// Profiles are tried in the given order; the first one with an endpoint wins.
    pub fn endpoint(
        &self,
        process: &ProcessIdentifier,
        transport_profiles: &[TransportProfile],
    ) -> Option<&Endpoint> {
        if transport_profiles.is_empty() {
            return self
                .endpoints
                .iter()
                .find(|e| &e.process_identifier == process);
        }

        transport_profiles.iter().find_map(|profile| {
            self.endpoints
                .iter()
                .find(|e| &e.process_identifier == process && &e.transport_profile == profile)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Scheme;

    fn endpoint(process: &str, profile: &str, address: &str) -> Endpoint {
        Endpoint::of(
            ProcessIdentifier::of(process, Scheme::of("cenbii-procid-ubl")),
            TransportProfile::of(profile).unwrap(),
            Url::parse(address).unwrap(),
            None,
        )
    }

    fn metadata(endpoints: Vec<Endpoint>) -> ServiceMetadata {
        ServiceMetadata::of(
            ParticipantIdentifier::of("0192:991825827", Scheme::of("iso6523-actorid-upis")),
            DocumentTypeIdentifier::of("invoice", Scheme::of("busdox-docid-qns")),
            endpoints,
            None,
        )
    }

    #[test]
    fn test_endpoint_prefers_profile_order() {
        let md = metadata(vec![
            endpoint("billing", TransportProfile::AS2_1_0, "https://as2.example/"),
            endpoint("billing", TransportProfile::AS4, "https://as4.example/"),
        ]);
        let process = ProcessIdentifier::of("billing", Scheme::of("cenbii-procid-ubl"));
        let as4 = TransportProfile::of(TransportProfile::AS4).unwrap();
        let as2 = TransportProfile::of(TransportProfile::AS2_1_0).unwrap();

        let found = md.endpoint(&process, &[as4.clone(), as2.clone()]).unwrap();
        assert_eq!(found.address.as_str(), "https://as4.example/");

        let found = md.endpoint(&process, &[as2]).unwrap();
        assert_eq!(found.address.as_str(), "https://as2.example/");
    }

    #[test]
    fn test_endpoint_unknown_process() {
        let md = metadata(vec![endpoint(
            "billing",
            TransportProfile::AS4,
            "https://as4.example/",
        )]);
        let other = ProcessIdentifier::of("ordering", Scheme::of("cenbii-procid-ubl"));
        assert!(md.endpoint(&other, &[]).is_none());
        assert!(!md.is_signed());
    }
}
