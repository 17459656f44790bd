//! Service metadata documents, plain or signed.

use tracing::debug;
use url::Url;

use super::signed::unwrap_metadata;
use crate::certificate::to_certificate;
use crate::config::ReaderConfig;
use crate::document::XmlDocument;
use crate::error::{LookupError, LookupResult, SecurityError};
use crate::identifier::{
    DocumentTypeIdentifier, ParticipantIdentifier, ProcessIdentifier, Scheme, TransportProfile,
};
use crate::model::{Endpoint, ServiceMetadata};
use crate::schema::{EndpointType, IdentifierType};
use crate::verifier::SignatureVerifier;

pub(super) fn parse_service_metadata(
    bytes: Vec<u8>,
    verifier: &dyn SignatureVerifier,
    config: &ReaderConfig,
) -> LookupResult<ServiceMetadata> {
    let doc = XmlDocument::parse(bytes)?;
    let unwrapped = unwrap_metadata(&doc, verifier)?;

    if unwrapped.signer.is_none() && config.require_signature {
        return Err(SecurityError::Unsigned.into());
    }

    let metadata = unwrapped.metadata;
    let Some(information) = metadata.service_information else {
        return Err(match metadata.redirect {
            Some(redirect) => LookupError::binding(format!(
                "service metadata redirects to {}; redirects are not followed",
                redirect.href
            )),
            None => LookupError::binding("service metadata has no ServiceInformation"),
        });
    };

    let mut endpoints = Vec::new();
    for process in &information.process_list.processes {
        let process_identifier = ProcessIdentifier::of(
            trimmed(&process.process_identifier),
            Scheme::of(&process.process_identifier.scheme),
        );
        for endpoint in &process.service_endpoint_list.endpoints {
            endpoints.push(to_endpoint(process_identifier.clone(), endpoint)?);
        }
    }

    let participant = &information.participant_identifier;
    let document = &information.document_identifier;
    let service_metadata = ServiceMetadata::of(
        ParticipantIdentifier::of(trimmed(participant), Scheme::of(&participant.scheme)),
        DocumentTypeIdentifier::of(trimmed(document), Scheme::of(&document.scheme)),
        endpoints,
        unwrapped.signer,
    );

    debug!(
        participant = %service_metadata.participant_identifier,
        document_type = %service_metadata.document_type_identifier,
        endpoints = service_metadata.endpoints.len(),
        signed = service_metadata.is_signed(),
        "parsed service metadata"
    );
    Ok(service_metadata)
}

fn to_endpoint(
    process_identifier: ProcessIdentifier,
    endpoint: &EndpointType,
) -> LookupResult<Endpoint> {
    let address = endpoint.endpoint_uri.trim();
    let address = Url::parse(address).map_err(|e| {
        LookupError::binding_with(format!("invalid EndpointURI '{}'", address), e)
    })?;

    let certificate = match endpoint.certificate_der()? {
        Some(der) => Some(to_certificate(&der)?),
        None => None,
    };

    Ok(Endpoint::of(
        process_identifier,
        TransportProfile::of(endpoint.transport_profile.as_str())?,
        address,
        certificate,
    ))
}

fn trimmed(identifier: &IdentifierType) -> &str {
    identifier.value.trim()
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

    use super::*;
    use crate::error::CertificateError;
    use crate::verifier::RejectSigned;

    fn endpoint_xml(profile: &str, address: &str, cert: Option<&str>) -> String {
        let cert = cert
            .map(|c| format!("<Certificate>{}</Certificate>", c))
            .unwrap_or_default();
        format!(
            r#"<Endpoint transportProfile="{}"><EndpointURI>{}</EndpointURI><RequireBusinessLevelSignature>false</RequireBusinessLevelSignature>{}<ServiceDescription>AP</ServiceDescription><TechnicalContactUrl>mailto:ops@ap.example</TechnicalContactUrl></Endpoint>"#,
            profile, address, cert
        )
    }

    fn metadata_xml(processes: &[(&str, Vec<String>)]) -> String {
        let processes: String = processes
            .iter()
            .map(|(id, endpoints)| {
                format!(
                    r#"<Process><ProcessIdentifier scheme="cenbii-procid-ubl">{}</ProcessIdentifier><ServiceEndpointList>{}</ServiceEndpointList></Process>"#,
                    id,
                    endpoints.concat()
                )
            })
            .collect();
        format!(
            r#"<ServiceMetadata xmlns="http://docs.oasis-open.org/bdxr/ns/SMP/2016/05"><ServiceInformation><ParticipantIdentifier scheme="iso6523-actorid-upis">0192:991825827</ParticipantIdentifier><DocumentIdentifier scheme="busdox-docid-qns">invoice</DocumentIdentifier><ProcessList>{}</ProcessList></ServiceInformation></ServiceMetadata>"#,
            processes
        )
    }

    fn parse(xml: &str) -> LookupResult<ServiceMetadata> {
        parse_service_metadata(xml.as_bytes().to_vec(), &RejectSigned, &ReaderConfig::default())
    }

    #[test]
    fn test_identifiers_are_read() {
        let md = parse(&metadata_xml(&[(
            "billing",
            vec![endpoint_xml(TransportProfile::AS4, "https://ap.example/as4", None)],
        )]))
        .unwrap();

        assert_eq!(md.participant_identifier.scheme().as_str(), "iso6523-actorid-upis");
        assert_eq!(md.participant_identifier.value(), "0192:991825827");
        assert_eq!(md.document_type_identifier.value(), "invoice");
        assert!(md.signer.is_none());

        let endpoint = &md.endpoints[0];
        assert_eq!(endpoint.process_identifier.value(), "billing");
        assert_eq!(endpoint.transport_profile.as_str(), TransportProfile::AS4);
        assert_eq!(endpoint.address.as_str(), "https://ap.example/as4");
        assert!(endpoint.certificate.is_none());
    }

    #[test]
    fn test_endpoints_flattened_in_document_order() {
        let md = parse(&metadata_xml(&[
            (
                "p1",
                vec![
                    endpoint_xml("t", "https://p1.example/e1", None),
                    endpoint_xml("t", "https://p1.example/e2", None),
                ],
            ),
            (
                "p2",
                vec![
                    endpoint_xml("t", "https://p2.example/e1", None),
                    endpoint_xml("t", "https://p2.example/e2", None),
                ],
            ),
        ]))
        .unwrap();

        let order: Vec<_> = md
            .endpoints
            .iter()
            .map(|e| (e.process_identifier.value(), e.address.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("p1", "https://p1.example/e1"),
                ("p1", "https://p1.example/e2"),
                ("p2", "https://p2.example/e1"),
                ("p2", "https://p2.example/e2"),
            ]
        );
    }

    #[test]
    fn test_empty_certificate_is_absent() {
        let md = parse(&metadata_xml(&[(
            "billing",
            vec![endpoint_xml("t", "https://ap.example/", Some(""))],
        )]))
        .unwrap();
        assert!(md.endpoints[0].certificate.is_none());
    }

    #[test]
    fn test_malformed_certificate_fails() {
        let garbage = BASE64.encode(b"not a certificate");
        let err = parse(&metadata_xml(&[(
            "billing",
            vec![endpoint_xml("t", "https://ap.example/", Some(&garbage))],
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            LookupError::CertificateDecode(CertificateError::Decode(_))
        ));
    }

    #[test]
    fn test_invalid_endpoint_uri_fails() {
        let err = parse(&metadata_xml(&[(
            "billing",
            vec![endpoint_xml("t", "not a uri", None)],
        )]))
        .unwrap_err();
        assert!(matches!(err, LookupError::Binding { .. }));
    }

    #[test]
    fn test_redirect_is_binding_failure() {
        let xml = r#"<ServiceMetadata><Redirect href="http://other.example/smp"><CertificateUID>x</CertificateUID></Redirect></ServiceMetadata>"#;
        let err = parse(xml).unwrap_err();
        assert!(err.to_string().contains("http://other.example/smp"));
    }

    #[test]
    fn test_require_signature_rejects_unsigned() {
        let xml = metadata_xml(&[]);
        let config = ReaderConfig::default().with_require_signature(true);
        let err = parse_service_metadata(xml.into_bytes(), &RejectSigned, &config).unwrap_err();
        assert!(matches!(err, LookupError::Security(SecurityError::Unsigned)));
    }
}
