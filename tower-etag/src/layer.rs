use tower_layer::Layer;

use crate::{DefaultGenerator, Etag, NeverSkip};

/// [`Layer`] producing [`Etag`](crate::Etag) services.
///
/// ```
/// use axum::{error_handling::HandleErrorLayer, http::StatusCode, routing::get, BoxError, Router};
/// use tower::ServiceBuilder;
/// use tower_etag::EtagLayer;
///
/// async fn handle_etag_err<T: Into<BoxError>>(err: T) -> (StatusCode, String) {
///     (StatusCode::INTERNAL_SERVER_ERROR, err.into().to_string())
/// }
///
/// let app = Router::new()
///     .route("/", get(|| async { "hello world" }))
///     .layer(
///         ServiceBuilder::new()
///             .layer(HandleErrorLayer::new(handle_etag_err))
///             .layer(EtagLayer::new()),
///     );
/// # let _app: Router = app;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EtagLayer<G = DefaultGenerator, P = NeverSkip> {
    weak: bool,
    generator: G,
    predicate: P,
}

impl EtagLayer {
    /// Strong etags, default length + CRC32 scheme, no skipping.
    pub fn new() -> Self {
        Self {
            weak: false,
            generator: DefaultGenerator,
            predicate: NeverSkip,
        }
    }
}

impl Default for EtagLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, P> EtagLayer<G, P> {
    /// Marks generated etags weak with the `W/` prefix. Applies on top of
    /// custom generators too, so a generator must not add the marker itself.
    pub fn weak(mut self, weak: bool) -> Self {
        self.weak = weak;
        self
    }

    /// Replaces the default tag calculation scheme.
    pub fn generator<G2>(self, generator: G2) -> EtagLayer<G2, P> {
        EtagLayer {
            weak: self.weak,
            generator,
            predicate: self.predicate,
        }
    }

    /// Skips etag handling for the exchanges matched by `predicate`.
    pub fn skip_when<P2>(self, predicate: P2) -> EtagLayer<G, P2> {
        EtagLayer {
            weak: self.weak,
            generator: self.generator,
            predicate,
        }
    }
}

impl<S, G: Clone, P: Clone> Layer<S> for EtagLayer<G, P> {
    type Service = Etag<S, G, P>;

    fn layer(&self, inner: S) -> Self::Service {
        Etag {
            inner,
            weak: self.weak,
            generator: self.generator.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_strong_tags() {
        assert!(!EtagLayer::new().weak);
    }

    #[test]
    fn weak_flag_is_opt_in() {
        assert!(EtagLayer::new().weak(true).weak);
        assert!(!EtagLayer::new().weak(true).weak(false).weak);
    }
}
