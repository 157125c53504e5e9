use std::{collections::HashSet, net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
};
use axum_test::TestServer;
use pathprobe_config::Config;
use pathprobe_core::{Dictionary, Prober};
use pathprobe_server::{AppState, create_app};

/// Serves 200 for `present` paths and 404 for everything else.
#[allow(unused)]
pub async fn spawn_target(present: &[&str]) -> SocketAddr {
    let present: Arc<HashSet<String>> =
        Arc::new(present.iter().map(|p| p.to_string()).collect());
    let router = Router::new()
        .fallback(
            |State(present): State<Arc<HashSet<String>>>, uri: Uri| async move {
                if present.contains(uri.path().trim_start_matches('/')) {
                    StatusCode::OK
                } else {
                    StatusCode::NOT_FOUND
                }
            },
        )
        .with_state(present);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind target");
    let addr = listener.local_addr().expect("target addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("target server");
    });
    addr
}

#[allow(unused)]
pub fn test_server(config: Config, dictionary: Dictionary) -> TestServer {
    let state =
        AppState::from_config(config, dictionary).expect("build app state");
    TestServer::new(create_app(state)).expect("test server")
}

#[allow(unused)]
pub fn test_server_with_prober(
    dictionary: Dictionary,
    prober: Arc<dyn Prober>,
) -> TestServer {
    let state = AppState::with_prober(Config::default(), dictionary, prober);
    TestServer::new(create_app(state)).expect("test server")
}
