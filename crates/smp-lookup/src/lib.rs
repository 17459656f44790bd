//! Response readers for BDXR Service Metadata Publisher (SMP) lookups.
//!
//! This crate turns documents fetched from an SMP into domain objects:
//!
//! - Service groups → the document type identifiers a participant supports
//! - Service metadata (plain or signed) → participant, document type,
//!   endpoints and the signing certificate
//!
//! Fetching, XML-DSig validation and certificate trust-chain validation are
//! left to the caller. Signature verification plugs in through
//! [`SignatureVerifier`].
//!
//! # Quick Start
//!
//! ```no_run
//! use smp_lookup::{BdxrReader, FetcherResponse, MetadataReader, ReaderConfig, RejectSigned};
//!
//! # fn example(body: Vec<u8>) -> Result<(), smp_lookup::LookupError> {
//! // Construct once, share across threads
//! let reader = BdxrReader::new(ReaderConfig::from_env(), RejectSigned);
//!
//! let metadata = reader.parse_service_metadata(FetcherResponse::from_bytes(body))?;
//! for endpoint in &metadata.endpoints {
//!     println!("{} via {}", endpoint.address, endpoint.transport_profile);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `SMP_READER_MAX_RESPONSE_BYTES` | Response size limit (default: 10 MiB) |
//! | `SMP_READER_REQUIRE_SIGNATURE` | Reject unsigned service metadata |

pub mod certificate;
pub mod config;
pub mod document;
pub mod error;
pub mod href;
pub mod identifier;
pub mod model;
pub mod namespace;
pub mod reader;
pub mod response;
mod schema;
pub mod verifier;

// Re-export main types
pub use certificate::{to_certificate, Certificate};
pub use config::ReaderConfig;
pub use document::{DocumentShape, RootElement, XmlDocument};
pub use error::{CertificateError, LookupError, LookupResult, SecurityError};
pub use identifier::{
    DocumentTypeIdentifier, ParticipantIdentifier, ProcessIdentifier, Scheme, TransportProfile,
};
pub use model::{Endpoint, ServiceMetadata};
pub use namespace::{SmpNamespace, NAMESPACE_201407, NAMESPACE_201605};
pub use reader::{BdxrReader, MetadataReader};
pub use response::FetcherResponse;
pub use verifier::{RejectSigned, SignatureVerifier};
