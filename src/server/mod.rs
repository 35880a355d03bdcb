use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::settings::Settings;

pub mod api;
pub mod routes;

pub use routes::router;

#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

pub async fn run_server(settings: Settings) -> std::io::Result<()> {
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    info!(addr = %settings.bind_addr, "voyage estimator listening on http://{}", settings.bind_addr);
    axum::serve(listener, router(AppState::new(settings))).await
}
