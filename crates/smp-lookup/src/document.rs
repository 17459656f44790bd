//! Parsed XML documents and root-element classification.

use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::error::{LookupError, LookupResult};
use crate::namespace::SmpNamespace;

/// Root element tag of the signed service metadata wrapper.
pub const SIGNED_SERVICE_METADATA_TAG: &str = "SignedServiceMetadata";

/// Root element tag of plain service metadata.
pub const SERVICE_METADATA_TAG: &str = "ServiceMetadata";

/// Root element tag of a service group.
pub const SERVICE_GROUP_TAG: &str = "ServiceGroup";

/// Root element of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootElement {
    /// Tag as written, including any prefix.
    pub qualified_name: String,

    /// Tag without prefix.
    pub local_name: String,

    /// Resolved namespace URI.
    pub namespace: Option<String>,
}

impl RootElement {
    /// SMP schema version, when the root namespace is a known one.
    pub fn smp_namespace(&self) -> Option<SmpNamespace> {
        self.namespace.as_deref().and_then(SmpNamespace::from_uri)
    }
}

/// A well-formed XML document.
///
/// The bytes are kept as received so signature verification covers exactly
/// what was parsed.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    bytes: Vec<u8>,
    root: RootElement,
}

impl XmlDocument {
    /// Parse bytes, checking well-formedness and locating the root element.
    pub fn parse(bytes: Vec<u8>) -> LookupResult<Self> {
        let root = scan_root(&bytes)?;
        Ok(Self { bytes, root })
    }

    pub fn root(&self) -> &RootElement {
        &self.root
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn shape(&self) -> DocumentShape {
        DocumentShape::classify(&self.root)
    }
}

fn scan_root(bytes: &[u8]) -> LookupResult<RootElement> {
    let mut reader = NsReader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut root: Option<RootElement> = None;
    let mut depth: usize = 0;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if depth == 0 {
                    if root.is_some() {
                        return Err(LookupError::binding("document has more than one root element"));
                    }
                    root = Some(RootElement {
                        qualified_name: utf8(e.name().as_ref())?,
                        local_name: utf8(e.local_name().as_ref())?,
                        namespace: match ns {
                            ResolveResult::Bound(ns) => Some(utf8(ns.as_ref())?),
                            _ => None,
                        },
                    });
                }
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(ref t) if depth == 0 && !t.is_empty() => {
                return Err(LookupError::binding("text content outside the root element"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(LookupError::binding("document ends inside an open element"));
    }
    root.ok_or_else(|| LookupError::binding("document has no root element"))
}

fn utf8(bytes: &[u8]) -> LookupResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| LookupError::binding_with("element name is not UTF-8", e))
}

/// Document shapes a reader knows how to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    ServiceGroup,
    ServiceMetadata,
    SignedServiceMetadata,
}

impl DocumentShape {
    /// Classify by root tag alone; namespace and attributes are not consulted.
    ///
    /// Anything that is not a service group or signed wrapper is treated as
    /// plain service metadata and left to the binder to accept or reject.
    pub fn classify(root: &RootElement) -> Self {
        match root.local_name.as_str() {
            SIGNED_SERVICE_METADATA_TAG => Self::SignedServiceMetadata,
            SERVICE_GROUP_TAG => Self::ServiceGroup,
            SERVICE_METADATA_TAG => Self::ServiceMetadata,
            _ => Self::ServiceMetadata,
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, Self::SignedServiceMetadata)
    }
}
