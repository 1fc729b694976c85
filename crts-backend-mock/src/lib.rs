//! In-process mock of the hosted backend.
//!
//! Serves the account endpoints and the document store over the same REST
//! surface as the real service, so integration tests and demos run without
//! network access.

pub mod api;
pub mod state;

pub use api::router;
pub use state::{AccountRecord, AppState, MAX_FAILED_ATTEMPTS};

use std::sync::Arc;

/// A running mock backend. Dropping the handle stops the server.
#[derive(Debug)]
pub struct ServerHandle {
    base_url: String,
    task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Bind to an ephemeral local port and serve in the background.
pub async fn serve(state: Arc<AppState>) -> std::io::Result<ServerHandle> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(state);

    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Mock backend stopped");
        }
    });

    Ok(ServerHandle {
        base_url: format!("http://{addr}"),
        task,
    })
}
