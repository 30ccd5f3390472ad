use anyhow::{Context, Result};
use clap::Parser;
use interview_gpt::{
    create_router, AppState, Config, CosmosStore, MemoryStore, OpenAiClient, Orchestrator,
    SessionStore,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "interview-gpt", about = "Interview practice service")]
struct Args {
    /// Configuration file (extension optional)
    #[arg(long, default_value = "config/interview-gpt")]
    config: String,

    /// Keep sessions in memory instead of Cosmos DB
    #[arg(long)]
    memory_store: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Loaded config: {}", cfg.service.name);

    let store: Arc<dyn SessionStore> = if args.memory_store {
        warn!("Using in-memory session store, sessions are lost on restart");
        Arc::new(MemoryStore::new())
    } else {
        let (endpoint, key) = cfg.cosmos_credentials()?;
        Arc::new(CosmosStore::new(endpoint, key, &cfg.cosmos.database)?)
    };
    info!("Session store: {}", store.name());

    let openai = Arc::new(OpenAiClient::new(
        &cfg.openai.base_url,
        cfg.openai_api_key()?.to_string(),
        cfg.openai.organization.clone(),
    ));

    let orchestrator = Orchestrator::new(
        store,
        openai.clone(),
        openai,
        cfg.orchestrator_settings(),
    );
    let app = create_router(AppState::new(orchestrator));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
