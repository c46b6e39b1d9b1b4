use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() {
    let args = chunkview::config::StartArgs::parse();
    let state = chunkview::app::state::AppState::new(&args);
    let addr = args.address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("error while starting TCP listener");

    let router = chunkview::app::server::router::router(
        state,
        args.allowed_origins(),
        args.allowed_headers(),
    );

    info!("Listening on {addr}");

    axum::serve(listener, router)
        .await
        .expect("error while starting server");
}
