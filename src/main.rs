// src/main.rs
use actix_web::{App, HttpServer, middleware, web};
use log::info;
use std::sync::Arc;

use pictoscope::config::Config;
use pictoscope::provider::StatisticsProvider;
use pictoscope::services::{ImageProcessor, RedisService};
use pictoscope::ImageAnalyzer;

mod handlers;

use crate::handlers::{analyze_images, get_analysis, health_check};

#[derive(Clone)]
pub struct AppState {
    redis_service: Arc<RedisService>,
    analyzer: Arc<ImageAnalyzer>,
    max_upload_bytes: usize,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Pictoscope service...");

    let config = Config::from_env()?;

    // Initialize services
    let redis_service =
        Arc::new(RedisService::new(&config.redis_url, config.report_ttl_secs).await?);
    let processor: Arc<dyn StatisticsProvider> =
        Arc::new(ImageProcessor::new(config.max_dimension));
    let analyzer = Arc::new(ImageAnalyzer::new(processor, &config.analyzer));

    let app_state = AppState {
        redis_service,
        analyzer,
        max_upload_bytes: config.max_upload_bytes,
    };

    info!("Starting HTTP server on {}", config.bind);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api/v1")
                    .route("/analyze", web::post().to(analyze_images))
                    .route("/analysis/{analysis_id}", web::get().to(get_analysis)),
            )
            .route("/health", web::get().to(health_check))
    })
    .bind(&config.bind)?
    .run()
    .await?;

    Ok(())
}
