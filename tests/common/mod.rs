#![allow(dead_code)]
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::Router;
use std::sync::{Arc, Mutex};

/// Requests seen by the test server as (method, path).
pub type Recorded = Arc<Mutex<Vec<(String, String)>>>;

pub struct TestServer {
    /// API base url, including the `/v1` prefix the real backend mounts under
    pub address: String,
    pub requests: Recorded,
}

impl TestServer {
    pub fn recorded(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    requests: Recorded,
}

async fn record(State(state): State<ServerState>, method: Method, uri: Uri) -> StatusCode {
    state
        .requests
        .lock()
        .unwrap()
        .push((method.to_string(), uri.path().to_string()));
    state.status
}

/// Spawn a backend that records every request and answers with `status`.
pub async fn spawn_server(status: u16) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let requests: Recorded = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        status: StatusCode::from_u16(status).unwrap(),
        requests: requests.clone(),
    };
    let app = Router::new().fallback(record).with_state(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });
    TestServer {
        address: format!("http://127.0.0.1:{port}/v1"),
        requests,
    }
}

/// Same as [`spawn_server`] for synchronous tests; keep the runtime alive
/// for as long as the server is needed.
pub fn spawn_server_blocking(status: u16) -> (TestServer, tokio::runtime::Runtime) {
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    let server = rt.block_on(spawn_server(status));
    (server, rt)
}

/// A base url nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/v1")
}
