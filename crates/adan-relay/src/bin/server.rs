//! Relay server binary
//!
//! Run with: cargo run -p adan-relay --bin adan-relay-server

use adan_relay::{config::RelayConfig, server::RelayServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adan_relay=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                        Adan Relay                         ║
║       Document Extraction, Chat and Speech Gateway        ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    match dotenv {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    let config = RelayConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM model: {}", config.llm.generate_model);
    tracing::info!("  - LLM endpoint: {}", config.llm.base_url);
    tracing::info!("  - TTS voice: {}", config.speech.voice_id);
    tracing::info!(
        "  - Max upload: {} MB",
        config.server.max_upload_size / (1024 * 1024)
    );

    let server = RelayServer::new(config)?;

    tracing::info!(
        "Checking {} at {}...",
        server.state().chat().provider(),
        server.state().chat().endpoint()
    );
    if server.state().chat().is_available().await {
        tracing::info!("Ollama is running");
    } else {
        tracing::warn!("Ollama not available at {}", server.state().chat().endpoint());
        tracing::warn!("Start it with `ollama serve` and pull the model:");
        tracing::warn!("  ollama pull {}", server.state().chat().model());
    }

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("\nEndpoints:");
    println!("  GET  /api/health  - Liveness and model info");
    println!("  POST /api/chat    - Relay a chat message");
    println!("  POST /api/extract - Extract text from a document");
    println!("  POST /api/tts     - Synthesize speech (audio/mpeg)");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
