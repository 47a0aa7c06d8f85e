use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use product_recommendation_service::catalog::load_context;
use product_recommendation_service::config::{Config, LogFormat};
use product_recommendation_service::metrics::{serve_metrics, MetricsMiddleware};
use product_recommendation_service::{
    register_routes, RecommendationHandlerState, RecommendationService,
};

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,actix_web=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.log.log_format);
    config
        .validate()
        .context("Configuration validation failed")?;

    info!(
        "Starting {} v{}",
        config.service.service_name,
        env!("CARGO_PKG_VERSION")
    );

    // Artifacts can be large; parse them off the runtime thread.
    let data_config = config.data.clone();
    let context = tokio::task::spawn_blocking(move || load_context(&data_config))
        .await
        .context("Artifact loading task failed")?
        .context("Failed to load recommendation artifacts")?;

    let service = Arc::new(RecommendationService::new(
        Arc::new(context),
        config.recommendation.clone(),
    ));
    if config.recommendation.shuffle_seed.is_some() {
        info!("Shuffle seed configured; blended recommendations are deterministic");
    }

    let state = web::Data::new(RecommendationHandlerState::new(service));

    let addr = config.bind_address();
    info!("Starting HTTP server on {}", addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .wrap(MetricsMiddleware)
            .route("/health", web::get().to(|| async { "OK" }))
            .route("/metrics", web::get().to(serve_metrics))
            .configure(register_routes)
    });
    if let Some(workers) = config.service.http_workers {
        server = server.workers(workers);
    }

    server
        .bind(&addr)
        .with_context(|| format!("Failed to bind {}", addr))?
        .run()
        .await
        .context("HTTP server error")?;

    Ok(())
}
