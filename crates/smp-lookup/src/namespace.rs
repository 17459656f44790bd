//! BDXR SMP schema namespaces.
//!
//! Both versions bind to the same document shape, so readers accept either.

/// OASIS BDXR SMP 1.0 draft (2014-07).
pub const NAMESPACE_201407: &str = "http://docs.oasis-open.org/bdxr/ns/SMP/2014/07";

/// OASIS BDXR SMP 1.0 (2016-05).
pub const NAMESPACE_201605: &str = "http://docs.oasis-open.org/bdxr/ns/SMP/2016/05";

/// Known SMP schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmpNamespace {
    V201407,
    V201605,
}

impl SmpNamespace {
    /// Namespaces a BDXR reader understands.
    pub const ALL: [SmpNamespace; 2] = [SmpNamespace::V201407, SmpNamespace::V201605];

    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            NAMESPACE_201407 => Some(Self::V201407),
            NAMESPACE_201605 => Some(Self::V201605),
            _ => None,
        }
    }

    pub fn uri(&self) -> &'static str {
        match self {
            Self::V201407 => NAMESPACE_201407,
            Self::V201605 => NAMESPACE_201605,
        }
    }
}

impl std::fmt::Display for SmpNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.uri())
    }
}
