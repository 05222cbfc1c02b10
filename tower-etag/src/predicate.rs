/// Filters individual exchanges out of etag handling.
///
/// Skipped exchanges pass through the middleware untouched: no body
/// buffering, no tag calculation, no validator comparison. The inner
/// service still runs exactly once either way.
pub trait SkipPredicate: Clone {
    /// Returns true if the given request should bypass etag handling.
    fn skip_request<B>(&mut self, req: &http::Request<B>) -> bool;

    /// Returns true if the given inner service response should be returned
    /// unchanged instead of being buffered and tagged.
    fn skip_response<B>(&mut self, resp: &http::Response<B>) -> bool;
}

/// Never skips. Non-200 responses, empty bodies and responses with a
/// handler-set `Etag` header still pass through regardless.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct NeverSkip;

impl SkipPredicate for NeverSkip {
    fn skip_request<B>(&mut self, _req: &http::Request<B>) -> bool {
        false
    }

    fn skip_response<B>(&mut self, _resp: &http::Response<B>) -> bool {
        false
    }
}
