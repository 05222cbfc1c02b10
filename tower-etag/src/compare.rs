use crate::etag::WEAK_PREFIX;

/// Outcome of checking a response's etag against the request's
/// `If-None-Match` validator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EtagMatch {
    /// Validator matched: the client's cached copy is current, answer 304.
    Hit,
    /// Validator present but stale: send the full body and the new etag.
    Miss,
    /// No validator on the request: send the full body and the etag.
    Absent,
}

/// Decides whether `etag` matches the raw `If-None-Match` header value.
///
/// A validator carrying the `W/` marker requests weak comparison: the marker
/// is dropped from both sides and the remaining opaque tags are compared for
/// equality. A validator without the marker requests strong comparison: the
/// etag must appear byte-for-byte inside the validator, which also covers
/// the comma-joined list form (`"a", "b"`) without tokenizing it.
///
/// Validators this cannot make sense of never match; the worst outcome is
/// resending a body the client already had.
pub fn eval_if_none_match(etag: &[u8], if_none_match: Option<&[u8]>) -> EtagMatch {
    let validator = match if_none_match {
        Some(v) => v,
        None => return EtagMatch::Absent,
    };
    if let Some(client_tag) = validator.strip_prefix(WEAK_PREFIX) {
        // the server side may carry the marker independently, so it is
        // compared both raw and with its own marker dropped
        if client_tag == etag || etag.strip_prefix(WEAK_PREFIX) == Some(client_tag) {
            return EtagMatch::Hit;
        }
        return EtagMatch::Miss;
    }
    if contains(validator, etag) {
        EtagMatch::Hit
    } else {
        EtagMatch::Miss
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    // an empty etag must never revalidate anything
    if needle.is_empty() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETAG: &[u8] = b"\"11-222957957\"";

    #[test]
    fn absent_validator() {
        assert_eq!(eval_if_none_match(ETAG, None), EtagMatch::Absent);
    }

    #[test]
    fn strong_exact_match() {
        assert_eq!(eval_if_none_match(ETAG, Some(ETAG)), EtagMatch::Hit);
    }

    #[test]
    fn strong_list_membership() {
        assert_eq!(
            eval_if_none_match(ETAG, Some(b"\"aaa\", \"11-222957957\"")),
            EtagMatch::Hit
        );
    }

    #[test]
    fn strong_single_byte_difference() {
        assert_eq!(
            eval_if_none_match(ETAG, Some(b"\"11-222957956\"")),
            EtagMatch::Miss
        );
    }

    #[test]
    fn weak_validator_matches_strong_etag() {
        assert_eq!(
            eval_if_none_match(b"\"x\"", Some(b"W/\"x\"")),
            EtagMatch::Hit
        );
    }

    #[test]
    fn weak_validator_matches_weak_etag() {
        assert_eq!(
            eval_if_none_match(b"W/\"x\"", Some(b"W/\"x\"")),
            EtagMatch::Hit
        );
    }

    #[test]
    fn strong_validator_never_matches_weak_etag() {
        assert_eq!(
            eval_if_none_match(b"W/\"x\"", Some(b"\"x\"")),
            EtagMatch::Miss
        );
    }

    #[test]
    fn weak_mismatch_is_a_miss() {
        assert_eq!(
            eval_if_none_match(b"\"x\"", Some(b"W/\"y\"")),
            EtagMatch::Miss
        );
    }

    #[test]
    fn server_marker_is_stripped_only_when_present() {
        // the first two bytes of the etag are not "W/", so nothing may be
        // cut off before comparing against the weak validator
        assert_eq!(
            eval_if_none_match(b"xy\"a\"", Some(b"W/\"a\"")),
            EtagMatch::Miss
        );
    }

    #[test]
    fn bare_weak_marker_never_matches() {
        assert_eq!(eval_if_none_match(ETAG, Some(b"W/")), EtagMatch::Miss);
    }

    #[test]
    fn empty_etag_never_matches() {
        assert_eq!(eval_if_none_match(b"", Some(b"\"x\"")), EtagMatch::Miss);
    }

    #[test]
    fn arbitrary_bytes_fall_through_to_miss() {
        assert_eq!(
            eval_if_none_match(ETAG, Some(&[0xff, 0xfe, 0x22])),
            EtagMatch::Miss
        );
    }
}
