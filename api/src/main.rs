use anyhow::Result;
use std::sync::Arc;
use tutor_api::{create_router, AppState};
use tutor_system::{AnswerService, OllamaService, ServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = ServiceConfig::from_env()?;
    log::info!(
        "Using model {} at {}",
        config.backend.model,
        config.backend.generate_url()
    );

    let backend = OllamaService::new(&config.backend)?;
    let state = AppState::new(AnswerService::new(Arc::new(backend)));
    let app = create_router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!("Server is running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
