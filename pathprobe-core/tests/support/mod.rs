use std::{
    collections::HashSet,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
};

/// A throwaway HTTP target that answers 200 for a fixed set of paths.
#[allow(unused)]
#[derive(Debug, Clone)]
pub struct MockTarget {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

#[allow(unused)]
impl MockTarget {
    pub fn base(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.addr, path)
    }

    /// Requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct TargetState {
    present: Arc<HashSet<String>>,
    all: bool,
    hits: Arc<AtomicUsize>,
}

async fn answer(State(state): State<TargetState>, uri: Uri) -> StatusCode {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let path = uri.path().trim_start_matches('/');
    if state.all || state.present.contains(path) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn spawn(state: TargetState) -> MockTarget {
    let hits = state.hits.clone();
    let router = Router::new().fallback(answer).with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock target");
    let addr = listener.local_addr().expect("mock target addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock target");
    });
    MockTarget { addr, hits }
}

/// 200 for each path in `present`, 404 otherwise.
#[allow(unused)]
pub async fn serve_paths(present: &[&str]) -> MockTarget {
    spawn(TargetState {
        present: Arc::new(present.iter().map(|p| p.to_string()).collect()),
        all: false,
        hits: Arc::default(),
    })
    .await
}

/// 200 for every path.
#[allow(unused)]
pub async fn serve_everything() -> MockTarget {
    spawn(TargetState {
        present: Arc::default(),
        all: true,
        hits: Arc::default(),
    })
    .await
}
