use anyhow::Result;
use tokio::runtime;

pub(crate) fn run_server(
    cfg: homeserver::ApiConfig,
    engine: homeserver::ServiceDiscoveryEngine,
) -> Result<()> {
    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
    rt.block_on(async move { homeserver::serve_http(cfg, engine).await })?;
    Ok(())
}
