use std::env;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use token_handoff_rs::{RECEIVE_PATH, TokenPayload, TokenReceiver};

/// Listener configuration
struct ListenerConfig {
    port: u16,
}

impl ListenerConfig {
    fn from_env() -> Self {
        Self {
            // 0 = let the OS pick an ephemeral port
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(0),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listener=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ListenerConfig::from_env();
    let mut receiver = TokenReceiver::bind(config.port).await?;
    tracing::info!("Handoff listener bound on {}", receiver.local_addr());
    println!(
        "Waiting for a handoff POST on http://localhost:{}{}",
        receiver.port(),
        RECEIVE_PATH
    );

    tokio::select! {
        payload = receiver.recv() => {
            match payload {
                Some(payload) => print_payload(&payload),
                None => anyhow::bail!("listener stopped before a payload arrived"),
            }
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!("Listener shut down");
    Ok(())
}

fn print_payload(payload: &TokenPayload) {
    println!("Received tokens for {}", payload.email);
    println!("  id token:      {}", redact(&payload.token));
    println!("  refresh token: {}", redact(&payload.r_token));
    println!("  client id:     {}", payload.client_id);
    println!("  client secret: {}", redact(&payload.client_secret));
}

/// Secrets never hit the terminal in full
fn redact(secret: &str) -> String {
    if secret.len() <= 8 {
        "****".to_string()
    } else {
        let head: String = secret.chars().take(4).collect();
        format!("{}****", head)
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
