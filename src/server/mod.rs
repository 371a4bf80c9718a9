pub mod handlers;
pub mod types;

pub use handlers::{AppState, generate_image, method_not_allowed};
pub use types::{ErrorResponse, GenerationRequest, GenerationResponse};

use crate::{
    Error, Result,
    config::Config,
    imagen::ImagenClient,
};
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::post,
};
use std::net::SocketAddr;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub const GENERATE_IMAGE_PATH: &str = "/api/generateImage";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            GENERATE_IMAGE_PATH,
            post(generate_image).fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds the CORS layer for the configured origins, or `None` when no
/// origins are configured.
pub fn cors_layer(allowed_origins: &[String]) -> Result<Option<CorsLayer>> {
    if allowed_origins.is_empty() {
        return Ok(None);
    }

    let allow_origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins = allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o)
                    .map_err(|_| Error::config(format!("Invalid allowed origin: '{}'", o)))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::POST])
            .allow_headers([CONTENT_TYPE]),
    ))
}

pub async fn run(config: Config) -> Result<()> {
    let client = ImagenClient::new(config.imagen.clone());
    info!("Forwarding image requests to {}", client.endpoint());

    let mut app = router(AppState::new(client));
    if let Some(cors) = cors_layer(&config.server.allowed_origins)? {
        info!("CORS enabled for: {:?}", config.server.allowed_origins);
        app = app.layer(cors);
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
