use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use http::{header::ETAG, HeaderValue, StatusCode};
use http_body::Body;
use http_body_util::{combinators::Collect, BodyExt};
use pin_project::pin_project;

use crate::{
    etag::weaken, eval_if_none_match, EtagGenerator, EtagMatch, EtagResBody, EtagServiceError,
    SkipPredicate,
};

/// Response future of [`Etag`](crate::Etag) services.
#[pin_project]
pub struct EtagServiceFuture<F, B: Body, G, P> {
    if_none_match: Option<HeaderValue>,
    weak: bool,
    generator: G,
    predicate: P,
    /// request side skip decision, taken before the inner service ran
    skip: bool,
    #[pin]
    state: EtagServiceFutureState<F, B>,
}

// parts is an Option just so it can be take()n out of the pinned state
#[pin_project(project = EtagServiceFutureStateProj)]
enum EtagServiceFutureState<F, B: Body> {
    Inner {
        #[pin]
        fut: F,
    },
    Collect {
        parts: Option<http::response::Parts>,
        #[pin]
        collect: Collect<B>,
    },
}

impl<F, B: Body, G, P> EtagServiceFuture<F, B, G, P> {
    pub(crate) fn new(
        fut: F,
        if_none_match: Option<HeaderValue>,
        weak: bool,
        generator: G,
        predicate: P,
        skip: bool,
    ) -> Self {
        Self {
            if_none_match,
            weak,
            generator,
            predicate,
            skip,
            state: EtagServiceFutureState::Inner { fut },
        }
    }
}

impl<F, B, G, P, E> Future for EtagServiceFuture<F, B, G, P>
where
    F: Future<Output = Result<http::Response<B>, E>>,
    B: Body,
    G: EtagGenerator,
    P: SkipPredicate,
{
    type Output = Result<http::Response<EtagResBody<B>>, EtagServiceError<E, B::Error>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut curr_state = this.state;

        match curr_state.as_mut().project() {
            EtagServiceFutureStateProj::Inner { fut } => match fut.poll(cx) {
                Poll::Pending => Poll::Pending,
                Poll::Ready(result) => {
                    let resp = match result {
                        Ok(r) => r,
                        Err(e) => return Poll::Ready(Err(EtagServiceError::InnerError(e))),
                    };
                    if *this.skip
                        || this.predicate.skip_response(&resp)
                        || resp.status() != StatusCode::OK
                        || resp.headers().contains_key(ETAG)
                    {
                        return Poll::Ready(Ok(EtagResBody::passthrough_resp(resp)));
                    }
                    let (parts, body) = resp.into_parts();
                    curr_state.set(EtagServiceFutureState::Collect {
                        parts: Some(parts),
                        collect: body.collect(),
                    });
                    cx.waker().wake_by_ref();
                    Poll::Pending
                }
            },
            EtagServiceFutureStateProj::Collect { parts, collect } => match collect.poll(cx) {
                Poll::Pending => Poll::Pending,
                Poll::Ready(result) => {
                    let body = match result {
                        Ok(collected) => collected.to_bytes(),
                        Err(e) => return Poll::Ready(Err(EtagServiceError::ReadResBodyError(e))),
                    };
                    let mut parts = parts.take().unwrap();
                    if body.is_empty() {
                        // nothing to tag, send the response as-is
                        return Poll::Ready(Ok(EtagResBody::buffered_resp(parts, body)));
                    }
                    let mut etag = this.generator.calc_etag(&parts, &body);
                    if *this.weak {
                        etag = weaken(&etag);
                    }
                    match eval_if_none_match(
                        etag.as_bytes(),
                        this.if_none_match.as_ref().map(HeaderValue::as_bytes),
                    ) {
                        EtagMatch::Hit => Poll::Ready(Ok(EtagResBody::not_modified_resp(parts))),
                        EtagMatch::Miss | EtagMatch::Absent => {
                            parts.headers.insert(ETAG, etag);
                            Poll::Ready(Ok(EtagResBody::buffered_resp(parts, body)))
                        }
                    }
                }
            },
        }
    }
}
