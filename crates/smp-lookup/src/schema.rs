//! Bound shapes of the BDXR SMP schema.
//!
//! The 2014-07 and 2016-05 schemas share element names, and the binder matches
//! on local names, so one set of types serves both versions. Elements the
//! readers do not use (extensions, activation dates, contacts, signatures) are
//! skipped.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Deserialize;

use crate::document::XmlDocument;
use crate::error::{CertificateError, LookupResult};

/// `ServiceGroup` root.
#[derive(Debug, Deserialize)]
pub(crate) struct ServiceGroupType {
    #[serde(rename = "ServiceMetadataReferenceCollection", default)]
    pub references: Option<ServiceMetadataReferenceCollectionType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceMetadataReferenceCollectionType {
    #[serde(rename = "ServiceMetadataReference", default)]
    pub references: Vec<ServiceMetadataReferenceType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceMetadataReferenceType {
    #[serde(rename = "@href")]
    pub href: String,
}

/// `SignedServiceMetadata` root: the metadata plus an enveloped signature.
#[derive(Debug, Deserialize)]
pub(crate) struct SignedServiceMetadataType {
    #[serde(rename = "ServiceMetadata")]
    pub service_metadata: ServiceMetadataType,
}

/// `ServiceMetadata` root, or the payload of the signed wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct ServiceMetadataType {
    #[serde(rename = "ServiceInformation", default)]
    pub service_information: Option<ServiceInformationType>,

    #[serde(rename = "Redirect", default)]
    pub redirect: Option<RedirectType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RedirectType {
    #[serde(rename = "@href")]
    pub href: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceInformationType {
    #[serde(rename = "ParticipantIdentifier")]
    pub participant_identifier: IdentifierType,

    #[serde(rename = "DocumentIdentifier")]
    pub document_identifier: IdentifierType,

    #[serde(rename = "ProcessList")]
    pub process_list: ProcessListType,
}

/// Any scheme-qualified identifier element.
#[derive(Debug, Deserialize)]
pub(crate) struct IdentifierType {
    #[serde(rename = "@scheme")]
    pub scheme: String,

    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessListType {
    #[serde(rename = "Process", default)]
    pub processes: Vec<ProcessType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessType {
    #[serde(rename = "ProcessIdentifier")]
    pub process_identifier: IdentifierType,

    #[serde(rename = "ServiceEndpointList")]
    pub service_endpoint_list: ServiceEndpointListType,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceEndpointListType {
    #[serde(rename = "Endpoint", default)]
    pub endpoints: Vec<EndpointType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EndpointType {
    #[serde(rename = "@transportProfile")]
    pub transport_profile: String,

    #[serde(rename = "EndpointURI")]
    pub endpoint_uri: String,

    /// `xs:base64Binary` DER certificate.
    #[serde(rename = "Certificate", default)]
    pub certificate: Option<String>,
}

impl EndpointType {
    /// DER bytes of the embedded certificate; `None` when absent or empty.
    pub fn certificate_der(&self) -> Result<Option<Vec<u8>>, CertificateError> {
        let Some(encoded) = self.certificate.as_deref() else {
            return Ok(None);
        };

        // base64Binary allows whitespace between groups
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Ok(None);
        }

        let der = BASE64
            .decode(compact.as_bytes())
            .map_err(CertificateError::Encoding)?;
        Ok(if der.is_empty() { None } else { Some(der) })
    }
}

/// Bind raw bytes to the service group shape.
pub(crate) fn bind_service_group(bytes: &[u8]) -> LookupResult<ServiceGroupType> {
    Ok(quick_xml::de::from_reader(bytes)?)
}

/// Bind a parsed document to the plain service metadata shape.
pub(crate) fn bind_service_metadata(doc: &XmlDocument) -> LookupResult<ServiceMetadataType> {
    Ok(quick_xml::de::from_reader(doc.bytes())?)
}

/// Bind a parsed document to the signed wrapper shape.
pub(crate) fn bind_signed_service_metadata(
    doc: &XmlDocument,
) -> LookupResult<SignedServiceMetadataType> {
    Ok(quick_xml::de::from_reader(doc.bytes())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binds_service_group_references_in_order() {
        let xml = r#"<ServiceGroup xmlns="http://docs.oasis-open.org/bdxr/ns/SMP/2016/05">
            <ParticipantIdentifier scheme="iso6523-actorid-upis">0192:991825827</ParticipantIdentifier>
            <ServiceMetadataReferenceCollection>
                <ServiceMetadataReference href="http://smp.example/a/services/s%3A%3A1"/>
                <ServiceMetadataReference href="http://smp.example/a/services/s%3A%3A2"/>
            </ServiceMetadataReferenceCollection>
        </ServiceGroup>"#;

        let group = bind_service_group(xml.as_bytes()).unwrap();
        let hrefs: Vec<_> = group
            .references
            .unwrap()
            .references
            .into_iter()
            .map(|r| r.href)
            .collect();
        assert_eq!(
            hrefs,
            vec![
                "http://smp.example/a/services/s%3A%3A1",
                "http://smp.example/a/services/s%3A%3A2"
            ]
        );
    }

    #[test]
    fn test_binds_empty_collection() {
        let group = bind_service_group(
            b"<ServiceGroup><ServiceMetadataReferenceCollection/></ServiceGroup>",
        )
        .unwrap();
        assert!(group.references.unwrap().references.is_empty());

        let group = bind_service_group(b"<ServiceGroup/>").unwrap();
        assert!(group.references.is_none());
    }

    #[test]
    fn test_certificate_der_handles_wrapped_base64() {
        let endpoint = EndpointType {
            transport_profile: "x".to_string(),
            endpoint_uri: "https://ap.example/".to_string(),
            certificate: Some("AQID\n  BAUG\n".to_string()),
        };
        assert_eq!(endpoint.certificate_der().unwrap(), Some(vec![1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_certificate_der_absent_or_blank() {
        let mut endpoint = EndpointType {
            transport_profile: "x".to_string(),
            endpoint_uri: "https://ap.example/".to_string(),
            certificate: None,
        };
        assert_eq!(endpoint.certificate_der().unwrap(), None);

        endpoint.certificate = Some("  \n ".to_string());
        assert_eq!(endpoint.certificate_der().unwrap(), None);
    }

    #[test]
    fn test_certificate_der_rejects_bad_base64() {
        let endpoint = EndpointType {
            transport_profile: "x".to_string(),
            endpoint_uri: "https://ap.example/".to_string(),
            certificate: Some("not*base64".to_string()),
        };
        assert!(matches!(
            endpoint.certificate_der(),
            Err(CertificateError::Encoding(_))
        ));
    }
}
