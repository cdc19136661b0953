use clap::Parser;
use grabbit::app::server::router::HttpConfiguration;
use tracing::info;

#[tokio::main]
async fn main() {
    let args = grabbit::config::StartArgs::parse();
    let app = grabbit::app::state::AppState::new(&args).await;

    let addr = args.address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("error while starting TCP listener");

    let cors_origins = args.allowed_origins();
    let cors_headers = args.allowed_headers();

    let config = HttpConfiguration {
        cors_origins: std::sync::Arc::from(&*cors_origins.leak()),
        cors_headers: std::sync::Arc::from(&*cors_headers.leak()),
    };

    let router = grabbit::app::server::router::router(app, config);

    info!("Listening on {addr}");

    axum::serve(listener, router)
        .await
        .expect("error while starting server");
}
