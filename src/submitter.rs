use anyhow::{Context, Result};
use reqwest::{Client, header};

use crate::types::TokenPayload;

/// Path the listener serves on its loopback port
pub const RECEIVE_PATH: &str = "/receiveToken";

const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";

/// Delivers a [`TokenPayload`] to the CLI's loopback listener.
///
/// One POST per call. No timeout, no retry, no cancellation: the login page
/// lives exactly as long as the handoff, so a stuck request is abandoned with
/// the page.
pub struct Submitter {
    http_client: Client,
}

impl Submitter {
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
        }
    }

    /// Target URL for a listener port, as read from the host UI.
    ///
    /// The port is spliced in verbatim; the host is fixed to localhost because
    /// the listener only ever binds the loopback interface.
    pub fn target_url(port: &str) -> String {
        format!("http://localhost:{}{}", port, RECEIVE_PATH)
    }

    /// POST the payload to the listener on `port`.
    ///
    /// Settlement with any HTTP status counts as delivered; only a
    /// transport-level failure (connection refused, DNS, broken socket) is an
    /// error.
    pub async fn submit(&self, port: &str, payload: &TokenPayload) -> Result<()> {
        let url = Self::target_url(port);
        tracing::debug!("posting handoff payload to {}", url);

        let response = self
            .http_client
            .post(&url)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(serde_json::to_string(payload)?)
            .send()
            .await
            .with_context(|| format!("Failed to deliver handoff payload to {}", url))?;

        tracing::debug!("handoff request settled with status {}", response.status());
        Ok(())
    }
}

impl Default for Submitter {
    fn default() -> Self {
        Self::new()
    }
}
