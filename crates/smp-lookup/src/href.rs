//! Service metadata reference decoding.
//!
//! A service group lists one reference per supported document type:
//!
//! - `http://smp.example/iso6523-actorid-upis%3A%3A0192%3A991825827/services/busdox-docid-qns%3A%3Ainvoice`
//!
//! The segment after `/services/` is the percent-encoded `scheme::value` of
//! the document type identifier.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{LookupError, LookupResult};
use crate::identifier::{DocumentTypeIdentifier, Scheme};

/// Path segment that precedes the encoded document type identifier.
pub const SERVICES_SEPARATOR: &str = "/services/";

/// Separator between scheme and value in a combined identifier.
pub const SCHEME_SEPARATOR: &str = "::";

/// Decode the document type identifier carried by a reference href.
///
/// Only the first `/services/` counts; everything after it is the identifier,
/// even if it contains `/services/` again. Decoding follows form encoding:
/// `+` becomes a space and `%2B` a literal `+`.
///
/// The identifier keeps `href` verbatim alongside its parsed, normalized URI.
///
/// # Errors
///
/// - [`LookupError::MalformedReference`] when the href lacks the
///   `/services/scheme::value` structure or is not an absolute URI. Callers
///   skip the entry.
/// - [`LookupError::Binding`] when the identifier is not valid percent-encoded
///   UTF-8. This fails the whole document.
///
/// # Examples
///
/// ```
/// use smp_lookup::href::parse_reference_href;
///
/// let id = parse_reference_href("http://smp.example/p/services/SCHEME1%3A%3Avalue1").unwrap();
/// assert_eq!(id.scheme().as_str(), "SCHEME1");
/// assert_eq!(id.value(), "value1");
/// assert_eq!(id.href(), Some("http://smp.example/p/services/SCHEME1%3A%3Avalue1"));
/// ```
pub fn parse_reference_href(href: &str) -> LookupResult<DocumentTypeIdentifier> {
    let Some((_, encoded)) = href.split_once(SERVICES_SEPARATOR) else {
        return Err(malformed(href, "missing '/services/' segment"));
    };

    let decoded = percent_decode_utf8(encoded)?;

    let Some((scheme, value)) = decoded.split_once(SCHEME_SEPARATOR) else {
        return Err(malformed(
            href,
            format!("'{}' is not a 'scheme::value' identifier", decoded),
        ));
    };

    let uri =
        Url::parse(href).map_err(|e| malformed(href, format!("not an absolute URI: {}", e)))?;

    Ok(DocumentTypeIdentifier::from_reference(
        value,
        Scheme::of(scheme),
        href,
        uri,
    ))
}

/// Strict form decoding: every `%` must start a two-digit hex escape, and `+`
/// decodes to a space.
fn percent_decode_utf8(encoded: &str) -> LookupResult<String> {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while let Some(offset) = bytes[i..].iter().position(|b| *b == b'%') {
        let at = i + offset;
        let escape = bytes.get(at + 1..at + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(LookupError::binding(format!(
                "invalid percent escape at offset {} in '{}'",
                at, encoded
            )));
        }
        i = at + 3;
    }

    let spaced = encoded.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| {
            LookupError::binding_with(format!("'{}' does not decode to UTF-8", encoded), e)
        })
}

fn malformed(href: &str, reason: impl Into<String>) -> LookupError {
    LookupError::MalformedReference {
        href: href.to_string(),
        reason: reason.into(),
    }
}
