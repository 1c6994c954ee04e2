mod modules;

use anyhow::Context;
use booktrack_kernel::settings::Settings;
use booktrack_kernel::{AppContext, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load BookTrack settings")?;

    booktrack_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "booktrack-app bootstrap starting"
    );

    let pool = booktrack_db::connect(&settings.database).await?;
    let ctx = AppContext::new(settings, pool);

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    booktrack_db::run_migrations(ctx.pool(), registry.collect_migrations()).await?;

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("booktrack-app bootstrap complete");

    booktrack_http::start_server(&registry, &ctx).await?;

    registry.stop_all().await?;

    Ok(())
}
