use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::submitter::RECEIVE_PATH;
use crate::types::{ReceiveAck, TokenPayload};

#[derive(Clone)]
struct ReceiverState {
    tx: mpsc::Sender<TokenPayload>,
}

/// Loopback listener for the handoff POST.
///
/// Binds `127.0.0.1` and serves `POST /receiveToken`; each delivered payload
/// is handed to the owner through [`TokenReceiver::recv`]. CORS is permissive
/// because the posting page is served from the auth server's origin, not from
/// this port.
pub struct TokenReceiver {
    local_addr: SocketAddr,
    rx: mpsc::Receiver<TokenPayload>,
    serve_task: tokio::task::JoinHandle<()>,
}

impl TokenReceiver {
    /// Bind on the loopback interface. Port 0 picks an ephemeral port;
    /// [`TokenReceiver::port`] reports the one actually bound.
    pub async fn bind(port: u16) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("Failed to bind handoff listener")?;
        let local_addr = listener.local_addr()?;

        let (tx, rx) = mpsc::channel(8);
        let app = build_app(ReceiverState { tx });
        let serve_task = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!("handoff listener error: {}", err);
            }
        });

        Ok(Self {
            local_addr,
            rx,
            serve_task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Wait for the next delivered payload.
    ///
    /// Returns `None` if the serving task has stopped and no payload is
    /// buffered.
    pub async fn recv(&mut self) -> Option<TokenPayload> {
        self.rx.recv().await
    }

    /// Stop serving and release the port. Consumes self to prevent use after
    /// close.
    pub fn close(self) {
        self.serve_task.abort();
    }
}

fn build_app(state: ReceiverState) -> Router {
    Router::new()
        .route(RECEIVE_PATH, post(receive_token))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn receive_token(
    State(state): State<ReceiverState>,
    Json(payload): Json<TokenPayload>,
) -> impl IntoResponse {
    tracing::info!("received handoff payload for {}", payload.email);
    if state.tx.send(payload).await.is_err() {
        tracing::warn!("handoff payload dropped, owner side closed");
    }
    (
        StatusCode::OK,
        Json(ReceiveAck {
            status: "ok".to_string(),
        }),
    )
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> TokenPayload {
        TokenPayload {
            token: "tok".to_string(),
            email: "user@example.com".to_string(),
            r_token: "ref".to_string(),
            client_id: "cid".to_string(),
            client_secret: "sec".to_string(),
        }
    }

    #[tokio::test]
    async fn bound_receiver_hands_over_posted_payload() {
        let mut receiver = TokenReceiver::bind(0).await.unwrap();
        let url = format!("http://localhost:{}{}", receiver.port(), RECEIVE_PATH);

        let client = reqwest::Client::new();
        let response = client
            .post(&url)
            .json(&sample_payload())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let ack: ReceiveAck = response.json().await.unwrap();
        assert_eq!(ack.status, "ok");

        let delivered = receiver.recv().await.unwrap();
        assert_eq!(delivered, sample_payload());
    }

    #[tokio::test]
    async fn health_route_reports_version() {
        let receiver = TokenReceiver::bind(0).await.unwrap();
        let url = format!("http://localhost:{}/health", receiver.port());

        let body: serde_json::Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

        receiver.close();
    }

    #[tokio::test]
    async fn closed_receiver_refuses_connections() {
        let receiver = TokenReceiver::bind(0).await.unwrap();
        let url = format!("http://localhost:{}{}", receiver.port(), RECEIVE_PATH);
        receiver.close();

        // Give the abort a moment to tear the listener down
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let client = reqwest::Client::new();
        let result = client.post(&url).json(&sample_payload()).send().await;
        assert!(result.is_err());
    }
}
