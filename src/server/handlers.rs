use super::types::{ErrorResponse, GenerationRequest, GenerationResponse};
use crate::{
    Error,
    imagen::{ImageClient, PredictResponse},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

type HandlerError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ImageClient>,
}

impl AppState {
    pub fn new(client: impl ImageClient + 'static) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

pub fn error_response(err: &Error) -> HandlerError {
    (
        err.status_code(),
        Json(ErrorResponse {
            error: err.client_message(),
        }),
    )
}

pub async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, HandlerError> {
    let request_id = Uuid::new_v4();

    let Json(request) = payload.map_err(|rejection| {
        let err = Error::invalid_request(rejection.body_text());
        warn!(%request_id, "Rejected image generation request: {}", err);
        error_response(&err)
    })?;

    info!(%request_id, "Received image generation request");

    let result = state
        .client
        .predict(&request.prompt)
        .await
        .and_then(PredictResponse::into_image_url);

    match result {
        Ok(image_url) => {
            info!(%request_id, "Image generated ({} bytes of data URI)", image_url.len());
            Ok(Json(GenerationResponse { image_url }))
        }
        Err(e) => {
            error!(%request_id, "Error calling Imagen API: {}", e);
            Err(error_response(&e))
        }
    }
}

/// Answers every non-POST method on the generation route.
pub async fn method_not_allowed() -> HandlerError {
    warn!("Rejected request with unsupported method");
    error_response(&Error::MethodNotAllowed)
}
