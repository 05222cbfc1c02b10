use std::{
    pin::Pin,
    task::{Context, Poll},
};

use bytes::Bytes;
use http::StatusCode;
use http_body::{Body, Frame, SizeHint};
use http_body_util::Full;
use pin_project::pin_project;

/// `http::Response` body type of [`Etag`](crate::Etag) services.
#[pin_project(project = EtagResBodyProj)]
pub enum EtagResBody<B> {
    /// exchange bypassed etag handling, inner body streams through
    Passthrough(#[pin] B),
    /// body was buffered for tag calculation and is replayed from memory
    Buffered(#[pin] Full<Bytes>),
    /// 304 responses return an empty http body
    NotModified,
}

impl<B> EtagResBody<B> {
    pub fn passthrough_resp(resp: http::Response<B>) -> http::Response<Self> {
        let (parts, body) = resp.into_parts();
        http::Response::from_parts(parts, Self::Passthrough(body))
    }

    pub fn buffered_resp(parts: http::response::Parts, body: Bytes) -> http::Response<Self> {
        http::Response::from_parts(parts, Self::Buffered(Full::new(body)))
    }

    /// Turns the parts of a revalidated response into the 304 reply.
    /// Headers stay as the inner service set them; only status and body
    /// change.
    pub fn not_modified_resp(mut parts: http::response::Parts) -> http::Response<Self> {
        parts.status = StatusCode::NOT_MODIFIED;
        http::Response::from_parts(parts, Self::NotModified)
    }
}

impl<B: Body<Data = Bytes>> Body for EtagResBody<B> {
    /// Data has to be Bytes for axum 0.7 compatibility:
    /// axum only impls IntoResponse for http_body::Body<Data = Bytes>
    type Data = Bytes;

    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.project() {
            EtagResBodyProj::Passthrough(b) => b.poll_frame(cx),
            EtagResBodyProj::Buffered(b) => b
                .poll_frame(cx)
                .map(|opt| opt.map(|res| res.map_err(|never| match never {}))),
            EtagResBodyProj::NotModified => Poll::Ready(None),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::Passthrough(b) => b.is_end_stream(),
            Self::Buffered(b) => b.is_end_stream(),
            Self::NotModified => true,
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            Self::Passthrough(b) => b.size_hint(),
            Self::Buffered(b) => b.size_hint(),
            Self::NotModified => SizeHint::with_exact(0),
        }
    }
}
