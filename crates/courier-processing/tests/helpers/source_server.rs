//! A throwaway HTTP server standing in for the attachment host.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// What the server saw of the last request.
#[derive(Clone, Debug, Default)]
pub struct SeenRequest {
    pub authorization: Option<String>,
    pub query: HashMap<String, String>,
}

#[derive(Clone)]
struct ServerState {
    body: Vec<u8>,
    status: StatusCode,
    seen: Arc<Mutex<Option<SeenRequest>>>,
}

pub struct SourceServer {
    pub base_url: String,
    seen: Arc<Mutex<Option<SeenRequest>>>,
}

impl SourceServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn serve_file(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Vec<u8>) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.seen.lock().unwrap() = Some(SeenRequest {
        authorization,
        query,
    });
    (state.status, state.body.clone())
}

/// Serve `body` with `status` for every GET path.
pub async fn spawn(body: Vec<u8>, status: StatusCode) -> SourceServer {
    let seen = Arc::new(Mutex::new(None));
    let state = ServerState {
        body,
        status,
        seen: seen.clone(),
    };

    let app = Router::new()
        .route("/{*path}", get(serve_file))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    SourceServer {
        base_url: format!("http://{}", addr),
        seen,
    }
}
