use rmcp::{ServiceExt, transport::stdio};

use gloss::client::ModelClient;
use gloss::server::GlossServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    load_dotenv();

    tracing::info!("gloss starting");

    // The credential is read lazily on first generation, so a missing key
    // surfaces as a tool-level error rather than a startup crash.
    let server = GlossServer::new(ModelClient::new());

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {e:?}"))?;

    service.waiting().await?;

    tracing::info!("gloss shutting down");
    Ok(())
}

/// Load a `.env`, preferring the binary's directory (MCP servers may start
/// with any CWD), then the cargo project root for development builds
/// (target/release/../..), then dotenvy's default CWD search.
fn load_dotenv() {
    let beside_binary = std::env::current_exe().ok().and_then(|exe| {
        let dir = exe.parent()?;
        [dir.join(".env"), dir.join("../../.env")]
            .into_iter()
            .find(|p| p.exists())
    });

    match beside_binary {
        Some(path) => {
            dotenvy::from_path(&path).ok();
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
}
