use std::net::SocketAddr;

use todo_api::application::ai_service::AiServiceImpl;
use todo_api::application::todo_service::TodoServiceImpl;
use todo_api::config::Settings;
use todo_api::domain::repository::TodoRepository;
use todo_api::http::routes::ai::{self, AiAppState};
use todo_api::http::routes::{AppState, items, lists};
use todo_api::http::routing;
use todo_api::infrastructure::openai_client::HttpCompletionClient;
use todo_api::infrastructure::sqlite_repo::SqliteTodoRepository;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::from_env();

    // Ensure SQLite file can be created/opened when using a file-backed URL
    prepare_sqlite_file(&settings.database_url)?;
    let repo = SqliteTodoRepository::connect(&settings.database_url).await?;
    repo.init().await?;

    let todo_service = TodoServiceImpl::new(repo);
    let completion_client = HttpCompletionClient::new(settings.ai.api_key.clone());
    let ai_service = AiServiceImpl::new(settings.ai, completion_client);

    let router = routing::app([
        lists::router(AppState { service: todo_service.clone() }),
        items::router(AppState { service: todo_service }),
        ai::router(AiAppState { service: ai_service }),
    ]);

    let addr: SocketAddr = "127.0.0.1:3000".parse()?;
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}

fn prepare_sqlite_file(database_url: &str) -> anyhow::Result<()> {
    // Skip in-memory
    if database_url.starts_with("sqlite::memory:") { return Ok(()); }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        // On Windows, absolute paths may look like /C:/path; strip the leading slash
        let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
            &path[1..]
        } else {
            path
        };
        use std::{fs, fs::OpenOptions, path::Path};
        let p = Path::new(path);
        if let Some(parent) = p.parent() { if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; } }
        if !p.exists() {
            let _ = OpenOptions::new().create(true).append(true).open(p)?;
        }
    }
    Ok(())
}
