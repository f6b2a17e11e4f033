//! HTTP server lifecycle.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::router::api_router;
use crate::inference::PredictionService;

/// Session metadata for a running prediction server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to get server address: {0}")]
    LocalAddr(#[source] std::io::Error),
    #[error("Server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Handle to a running prediction server.
pub struct ApiServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ApiServer {
    /// Shut down the server gracefully. In-flight requests complete.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Server shutdown signal sent");
        }
    }

    /// Wait for the server task to exit.
    pub async fn join(self) -> Result<(), ServerError> {
        self.task.await?;
        Ok(())
    }
}

/// Start the prediction server on `addr`.
///
/// Port 0 binds an ephemeral port; the bound port is reported in
/// `ApiServer::session`.
pub async fn start_server_on(
    service: Arc<PredictionService>,
    addr: SocketAddr,
) -> Result<ApiServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

    let model_loaded = service.model_loaded();
    let app = api_router(service);

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Server received shutdown signal");
        };

        tracing::info!(%addr, model_loaded, "Prediction server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Prediction server error: {e}");
        }

        tracing::info!("Prediction server stopped");
    });

    Ok(ApiServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn localhost() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    async fn start() -> ApiServer {
        start_server_on(Arc::new(PredictionService::fallback_only()), localhost())
            .await
            .expect("server should start")
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let mut server = start().await;

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);

        let url = format!("http://127.0.0.1:{}/health", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        server.join().await.unwrap();
    }

    #[tokio::test]
    async fn server_session_has_valid_metadata() {
        let mut server = start().await;

        assert!(chrono::DateTime::parse_from_rfc3339(&server.session.started_at).is_ok());
        assert!(server
            .session
            .server_addr
            .ends_with(&format!(":{}", server.session.port)));

        server.shutdown();
    }

    #[tokio::test]
    async fn server_serves_prediction_over_http() {
        let mut server = start().await;
        let port = server.session.port;

        let url = format!("http://127.0.0.1:{port}/nonexistent");
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/predict"))
            .json(&serde_json::json!({"symptoms": ["itching", "skin rash", "swelling"]}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["disease"], "Eczema");
        assert_eq!(json["specialist"], "Dermatologist");

        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start().await;
        server.shutdown();
        server.shutdown();
        server.join().await.unwrap();
    }

    #[tokio::test]
    async fn binding_a_taken_port_fails() {
        let mut first = start().await;
        let taken = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), first.session.port);
        let err = start_server_on(Arc::new(PredictionService::fallback_only()), taken)
            .await
            .err()
            .expect("second bind should fail");
        assert!(matches!(err, ServerError::Bind { .. }));
        first.shutdown();
    }
}
