use post_core::{PostFetcher, PostService, PostStore};
use post_server::config::Config;
use post_server::scheduler::spawn_sync_timer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let store = PostStore::open(&config.db_path)?;
    let fetcher = PostFetcher::new(&config.source_url);
    let service = PostService::new(store, fetcher);

    spawn_sync_timer(service.clone(), config.sync_interval);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        source = %config.source_url,
        db = %config.db_path,
        "post-server listening"
    );
    post_server::run(listener, service).await?;
    Ok(())
}
