use axum::{
    error_handling::HandleErrorLayer, http::StatusCode, response::Html, routing::get, BoxError,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_etag::{base64_blake3_etag::Base64Blake3Generator, EtagLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let tagged = Router::new()
        .route("/", get(home))
        .route("/greeting", get(greeting))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_etag_layer_err))
                .layer(EtagLayer::new()),
        );

    // weak hashed tags for content where byte-identical re-renders are not
    // guaranteed
    let hashed = Router::new().route("/hashed", get(hashed)).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_etag_layer_err))
            .layer(EtagLayer::new().weak(true).generator(Base64Blake3Generator)),
    );

    let app = tagged.merge(hashed).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    let listener = TcpListener::bind("0.0.0.0:3000").await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

pub async fn handle_etag_layer_err<T: Into<BoxError>>(err: T) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.into().to_string())
}

pub async fn home() -> Html<&'static str> {
    Html(concat!(
        "<h1>hello world</h1>",
        "<p>request again with If-None-Match set to the Etag you got back ",
        "and watch the 304</p>",
    ))
}

#[derive(Clone, Debug, Serialize)]
pub struct Greeting {
    pub greeting: String,
    pub name: String,
}

pub async fn greeting() -> Json<Greeting> {
    Json(Greeting {
        greeting: "hello".to_owned(),
        name: "world".to_owned(),
    })
}

pub async fn hashed() -> &'static str {
    "tagged with base64 blake3 instead of length + crc32"
}
