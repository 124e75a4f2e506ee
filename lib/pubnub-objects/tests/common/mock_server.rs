#![allow(
    clippy::missing_errors_doc,
    dead_code,
    missing_docs,
    clippy::expect_used
)]
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use http::uri::Scheme;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::info;

use pubnub_objects::{PubNubClient, PubNubClientBuilder};

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub body: String,
}

impl RecordedRequest {
    /// Values of a query parameter, still percent-encoded.
    pub fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .filter(|(name, _)| *name == key)
            .map(|(_, value)| value)
            .collect()
    }

    /// Recomputes the `v2` signature from what was received, `signature` excluded.
    pub fn expected_signature(&self, secret_key: &str, publish_key: &str) -> String {
        let mut pairs: Vec<(&str, &str)> = self
            .query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .filter(|(name, _)| *name != "signature")
            .collect();
        pairs.sort_by(|left, right| left.0.cmp(right.0));
        let query = pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let message = format!(
            "{}\n{publish_key}\n{}\n{query}\n{}",
            self.method, self.path, self.body
        );
        let mut mac =
            Hmac::<Sha256>::new_from_slice(secret_key.as_bytes()).expect("any key length");
        mac.update(message.as_bytes());
        format!("v2.{}", URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("a JSON body")
    }
}

#[derive(Debug, Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    status: StatusCode,
    response: serde_json::Value,
}

/// Local HTTP server answering every request with a canned JSON response.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(status: u16, response: serde_json::Value) -> anyhow::Result<Self> {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: Arc::clone(&requests),
            status: StatusCode::from_u16(status).context("valid status code")?,
            response,
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock server")?;
        let addr = listener.local_addr()?;
        info!(%addr, "launching mock server");
        let handle = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app).await {
                tracing::error!(?error, "mock server stopped");
            }
        });

        Ok(Self {
            addr,
            requests,
            handle,
        })
    }

    /// Client builder pointing at this server.
    pub fn client_builder(&self) -> PubNubClientBuilder {
        PubNubClient::builder()
            .with_scheme(Scheme::HTTP)
            .with_origin(self.addr.ip().to_string())
            .with_port(self.addr.port())
            .with_subscribe_key("sub-c-key")
            .with_user_id("gateway")
    }

    pub fn client(&self) -> PubNubClient {
        self.client_builder().build().expect("valid client")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("not poisoned").clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().expect("one request")
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    body: String,
) -> (StatusCode, Json<serde_json::Value>) {
    let request = RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        body,
    };
    info!(?request, "received");
    state
        .requests
        .lock()
        .expect("not poisoned")
        .push(request);

    (state.status, Json(state.response))
}
