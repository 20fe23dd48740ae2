//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{BlobAdapter, GeminiThumbnailAdapter, KvAdapter, OpenAiOutcomeAdapter},
    config::Config,
    error::ApiError,
    web::{
        create_resource_handler, delete_resource_handler, generate_handler,
        list_resources_handler, rest::ApiDoc, state::AppState, update_resource_handler,
        upload_asset_handler,
    },
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, post},
    Router,
};
use phrontier_core::{
    assets::AssetGateway,
    catalog::{CatalogLimits, ResourceCatalog},
    enrich::OutcomeEnricher,
    ports::ThumbnailGenerator,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the Shared HTTP Client & Store Adapters ---
    let http = reqwest::Client::builder().build()?;
    let kv_adapter = Arc::new(KvAdapter::new(
        http.clone(),
        config.kv_url.clone(),
        config.kv_token.clone(),
        config.kv_key.clone(),
    ));
    let blob_adapter = Arc::new(BlobAdapter::new(
        http.clone(),
        config.blob_url.clone(),
        config.blob_token.clone(),
        config.upload_timeout,
    ));

    // --- 3. Initialize the AI Adapters (optional) ---
    let (outcomes, thumbnails): (OutcomeEnricher, Option<Arc<dyn ThumbnailGenerator>>) =
        match &config.ai_api_key {
            Some(key) => {
                let openai_config = OpenAIConfig::new()
                    .with_api_key(key.clone())
                    .with_api_base(config.ai_chat_base.clone());
                let outcome_adapter = OpenAiOutcomeAdapter::new(
                    Client::with_config(openai_config),
                    config.outcome_model.clone(),
                    config.ai_timeout,
                );
                let thumbnail_adapter = GeminiThumbnailAdapter::new(
                    http.clone(),
                    config.ai_rest_base.clone(),
                    key.clone(),
                    config.image_model.clone(),
                    config.ai_timeout,
                );
                (
                    OutcomeEnricher::new(Arc::new(outcome_adapter)),
                    Some(Arc::new(thumbnail_adapter) as Arc<dyn ThumbnailGenerator>),
                )
            }
            None => {
                info!("AI_API_KEY is not set; enrichment runs on fallbacks only");
                (OutcomeEnricher::disabled(), None)
            }
        };

    // --- 4. Build the Shared AppState ---
    let catalog = ResourceCatalog::new(
        kv_adapter,
        outcomes,
        CatalogLimits {
            max_items: config.max_items,
            max_thumbnail_len: config.max_thumbnail_len,
        },
    );
    let assets = AssetGateway::new(blob_adapter, config.max_upload_bytes);
    let app_state = Arc::new(AppState {
        catalog,
        assets,
        thumbnails,
    });

    // --- 5. Configure CORS for the static client ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    // --- 6. Create the Web Router ---
    let api_router = Router::new()
        .route(
            "/resources",
            get(list_resources_handler)
                .post(create_resource_handler)
                .patch(update_resource_handler)
                .delete(delete_resource_handler),
        )
        .route("/upload", post(upload_asset_handler))
        .route("/generate", post(generate_handler))
        // The transport body cap sits above the gateway limit; the gateway
        // owns the user-facing rejection message.
        .layer(DefaultBodyLimit::max(config.max_upload_bytes * 2))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 7. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
