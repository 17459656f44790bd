//! Scheme-qualified identifiers used in SMP documents.

use std::fmt;

use url::Url;

use crate::error::{LookupError, LookupResult};

/// Identifier scheme (e.g., `iso6523-actorid-upis`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scheme(String);

impl Scheme {
    pub fn of(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! scheme_qualified {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            scheme: Scheme,
            value: String,
        }

        impl $name {
            pub fn of(value: impl Into<String>, scheme: Scheme) -> Self {
                Self {
                    scheme,
                    value: value.into(),
                }
            }

            pub fn scheme(&self) -> &Scheme {
                &self.scheme
            }

            pub fn value(&self) -> &str {
                &self.value
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}::{}", self.scheme, self.value)
            }
        }
    };
}

scheme_qualified!(
    /// Identifies a participant in the network.
    ParticipantIdentifier
);

scheme_qualified!(
    /// Identifies a business process an endpoint serves.
    ProcessIdentifier
);

/// Identifies a document type.
///
/// Identifiers discovered through a service group keep the reference they
/// were decoded from, both as written and as a parsed URI. Neither is part of
/// equality.
#[derive(Debug, Clone)]
pub struct DocumentTypeIdentifier {
    scheme: Scheme,
    value: String,
    href: Option<String>,
    uri: Option<Url>,
}

impl DocumentTypeIdentifier {
    pub fn of(value: impl Into<String>, scheme: Scheme) -> Self {
        Self {
            scheme,
            value: value.into(),
            href: None,
            uri: None,
        }
    }

    /// Identifier decoded from a service metadata reference `href`, which
    /// parses as `uri`.
    pub fn from_reference(
        value: impl Into<String>,
        scheme: Scheme,
        href: impl Into<String>,
        uri: Url,
    ) -> Self {
        Self {
            scheme,
            value: value.into(),
            href: Some(href.into()),
            uri: Some(uri),
        }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Reference this identifier was decoded from, exactly as the service
    /// group wrote it.
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Reference this identifier was decoded from, parsed.
    ///
    /// Parsing normalizes: scheme and host are lowercased, default ports and
    /// dot segments are removed. Use [`href`](Self::href) for the exact text.
    pub fn uri(&self) -> Option<&Url> {
        self.uri.as_ref()
    }
}

impl PartialEq for DocumentTypeIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme && self.value == other.value
    }
}

impl Eq for DocumentTypeIdentifier {}

impl std::hash::Hash for DocumentTypeIdentifier {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.value.hash(state);
    }
}

impl fmt::Display for DocumentTypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.scheme, self.value)
    }
}

/// Wire protocol an endpoint supports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransportProfile(String);

impl TransportProfile {
    /// PEPPOL AS2 v1.
    pub const AS2_1_0: &'static str = "busdox-transport-as2-ver1p0";
    /// PEPPOL AS2 v2.
    pub const AS2_2_0: &'static str = "busdox-transport-as2-ver2p0";
    /// PEPPOL AS4 v2.
    pub const AS4: &'static str = "peppol-transport-as4-v2_0";
    /// OASIS BDXR AS4.
    pub const BDXR_AS4: &'static str = "bdxr-transport-ebms3-as4-v1p0";

    /// Parse a transport profile, rejecting blank values.
    pub fn of(value: impl Into<String>) -> LookupResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LookupError::binding("endpoint transport profile is empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
