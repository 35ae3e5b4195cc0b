//! API server implementation

use tokio::net::TcpListener;

use veil_core::Result;

use crate::routes::router;
use crate::state::AppState;

/// Veil API server
#[derive(Debug)]
pub struct Server {
    bind: String,
    state: AppState,
}

impl Server {
    /// Create a server that will listen on `bind`.
    pub fn new(bind: impl Into<String>, state: AppState) -> Self {
        Self {
            bind: bind.into(),
            state,
        }
    }

    /// Listen and serve until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.bind.as_str()).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");
        axum::serve(listener, router(self.state)).await?;
        Ok(())
    }
}
