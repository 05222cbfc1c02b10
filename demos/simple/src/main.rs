#[tokio::main]
async fn main() {
    etag_demo::main().await
}
