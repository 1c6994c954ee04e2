//! HTTP server facade for BookTrack with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Router};

use booktrack_kernel::{AppContext, ModuleRegistry};

pub mod error;
pub mod router;

use router::RouterBuilder;

/// Largest accepted request body: the 16 MB image plus multipart framing.
const MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024 + 64 * 1024;

/// Start the HTTP server with the given module registry
pub async fn start_server(registry: &ModuleRegistry, ctx: &AppContext) -> anyhow::Result<()> {
    let settings = ctx.settings();

    tracing::info!(
        "starting HTTP server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    let app = build_router(registry, ctx);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, ctx: &AppContext) -> Router {
    let mut router_builder = RouterBuilder::new();

    // Routes go in before the middlewares: `Router::layer` only wraps
    // routes that exist at the time of the call, so layering an empty
    // router would leave every route below unprotected (and capped at
    // axum's default 2 MB body limit).

    // Add health check route
    router_builder = router_builder.route("/healthz", get(health_check));

    // Mount module routes
    for module in registry.modules() {
        let mount_path = module.mount_path();
        tracing::info!(
            module = module.name(),
            "mounting module routes under {}",
            mount_path
        );
        router_builder = router_builder.mount(&mount_path, module.routes(ctx));
    }

    // Add OpenAPI documentation
    router_builder = router_builder.with_openapi(registry);

    // Add global middlewares
    router_builder = router_builder
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(ctx.settings().server.request_timeout_ms)
        .with_body_limit(MAX_REQUEST_BYTES);

    router_builder.build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
