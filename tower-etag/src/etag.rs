use bytes::Bytes;
use http::HeaderValue;

/// Marker distinguishing a weak entity-tag from a strong one.
pub(crate) const WEAK_PREFIX: &[u8] = b"W/";

/// Strategy for calculating a response's entity-tag value.
///
/// The middleware buffers the response body before calling this, so the tag
/// can be derived from the complete content.
pub trait EtagGenerator: Clone {
    /// Calculates the entity-tag for a response, without any weak marker:
    /// the middleware prepends `W/` itself when configured weak.
    ///
    /// Implementors own the tag's internal format including quoting; the
    /// result is emitted verbatim. `body` is the fully buffered response
    /// body and is never empty.
    fn calc_etag(&mut self, parts: &http::response::Parts, body: &[u8]) -> HeaderValue;
}

/// The default scheme: [`len_crc32_etag`] over the body.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct DefaultGenerator;

impl EtagGenerator for DefaultGenerator {
    fn calc_etag(&mut self, _parts: &http::response::Parts, body: &[u8]) -> HeaderValue {
        len_crc32_etag(body)
    }
}

/// Calculates the etag value as the quoted decimal byte length and CRC32-IEEE
/// checksum of the body, e.g. `"11-222957957"` for `b"hello world"`.
///
/// Clients echo etags back byte-for-byte, so both numbers use plain unsigned
/// decimal rendering with no leading zeros.
pub fn len_crc32_etag(body: &[u8]) -> HeaderValue {
    let tag = format!("\"{}-{}\"", body.len(), crc32fast::hash(body));
    // quoted decimal digits and '-' are always a valid header value
    HeaderValue::try_from(tag).unwrap()
}

pub(crate) fn weaken(tag: &HeaderValue) -> HeaderValue {
    let mut buf = Vec::with_capacity(WEAK_PREFIX.len() + tag.as_bytes().len());
    buf.extend_from_slice(WEAK_PREFIX);
    buf.extend_from_slice(tag.as_bytes());
    // "W/" in front of a valid header value remains a valid header value
    HeaderValue::from_maybe_shared(Bytes::from(buf)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_vector() {
        assert_eq!(len_crc32_etag(b"hello world"), "\"11-222957957\"");
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            len_crc32_etag(b"some payload"),
            len_crc32_etag(b"some payload")
        );
    }

    #[test]
    fn zero_values_render_as_single_digits() {
        assert_eq!(len_crc32_etag(b""), "\"0-0\"");
    }

    #[test]
    fn length_shows_up_in_the_tag() {
        let one = len_crc32_etag(b"a");
        let two = len_crc32_etag(b"ab");
        assert_ne!(one, two);
        assert!(one.as_bytes().starts_with(b"\"1-"));
        assert!(two.as_bytes().starts_with(b"\"2-"));
    }

    #[test]
    fn weaken_prepends_the_marker() {
        let tag = HeaderValue::from_static("\"1-2\"");
        assert_eq!(weaken(&tag), "W/\"1-2\"");
    }
}
