//! Tower middleware for `Etag` based HTTP response revalidation.
//!
//! After the wrapped service produces a 200 response with a non-empty body,
//! the middleware calculates an entity-tag for it, by default the quoted
//! `<byte length>-<CRC32 checksum>` of the body, and checks it against the
//! request's `If-None-Match` validator: on a match the response is rewritten
//! into an empty-bodied `304 Not Modified`, otherwise the tag rides out on
//! the `Etag` header.
//!
//! Nothing is stored between requests. Revalidation works purely off the
//! validator the client re-sends, so the middleware always runs the wrapped
//! service, buffers its body and pays the tag calculation even when it ends
//! up answering 304.
//!
//! ```
//! use axum::{error_handling::HandleErrorLayer, http::StatusCode, routing::get, BoxError, Router};
//! use tower::ServiceBuilder;
//! use tower_etag::EtagLayer;
//!
//! async fn handle_etag_err<T: Into<BoxError>>(err: T) -> (StatusCode, String) {
//!     (StatusCode::INTERNAL_SERVER_ERROR, err.into().to_string())
//! }
//!
//! let app = Router::new()
//!     .route("/", get(|| async { "hello world" }))
//!     .layer(
//!         ServiceBuilder::new()
//!             .layer(HandleErrorLayer::new(handle_etag_err))
//!             .layer(EtagLayer::new().weak(true)),
//!     );
//! # let _app: Router = app;
//! ```

use std::task::Poll;
use tower_service::Service;

mod compare;
mod err;
mod etag;
mod future;
mod layer;
mod predicate;
mod response;

#[cfg(feature = "base64-blake3-etag")]
pub mod base64_blake3_etag;

pub use compare::*;
pub use err::*;
pub use etag::*;
pub use future::*;
pub use layer::*;
pub use predicate::*;
pub use response::*;

/// Etag revalidation middleware service.
///
/// 200 responses with a non-empty body and no handler-set `Etag` header get
/// their body buffered and tagged; the tag either answers the request's
/// `If-None-Match` validator with an empty 304 or is stamped on the `Etag`
/// header. Everything else passes through untouched. Configured and
/// constructed through [`EtagLayer`].
#[derive(Clone, Copy, Debug)]
pub struct Etag<S, G = DefaultGenerator, P = NeverSkip> {
    inner: S,
    weak: bool,
    generator: G,
    predicate: P,
}

impl<ReqBody, ResBody, S, G, P> Service<http::Request<ReqBody>> for Etag<S, G, P>
where
    S: Service<http::Request<ReqBody>, Response = http::Response<ResBody>>,
    ResBody: http_body::Body,
    G: EtagGenerator,
    P: SkipPredicate,
{
    type Response = http::Response<EtagResBody<ResBody>>;

    type Error = EtagServiceError<S::Error, <ResBody as http_body::Body>::Error>;

    type Future = EtagServiceFuture<S::Future, ResBody, G, P>;

    fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(EtagServiceError::InnerError)
    }

    fn call(&mut self, req: http::Request<ReqBody>) -> Self::Future {
        let skip = self.predicate.skip_request(&req);
        let if_none_match = req.headers().get(http::header::IF_NONE_MATCH).cloned();
        EtagServiceFuture::new(
            self.inner.call(req),
            if_none_match,
            self.weak,
            self.generator.clone(),
            self.predicate.clone(),
            skip,
        )
    }
}
