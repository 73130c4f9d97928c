use axum::Router;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::ApiState;

use super::{ApiDoc, OPENAPI_JSON_PATH};

/// Serves the OpenAPI document and the Swagger UI, Redoc and RapiDoc viewers.
pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"))
}
