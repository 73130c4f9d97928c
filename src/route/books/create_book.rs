use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    extractor::json::ApiJson, inventory::Book, pretty_json::PrettyJson, state::ApiState,
    traits::InventoryProvider,
};

#[derive(Debug)]
pub struct CreateBookResponse(pub Book);

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, PrettyJson(self.0)).into_response()
    }
}

/// Appends a book and echoes it back.
///
/// Ids are not checked for uniqueness: a book whose id is already taken is
/// stored anyway, but lookups keep returning the older one.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = crate::inventory::Book,
    responses(
        (status = 201, description = "The stored book", body = crate::inventory::Book),
        (status = 400, description = "The body is not a valid book", body = crate::error::ApiErrorMessage),
    )
)]
pub async fn create_book(
    State(state): State<ApiState>,
    ApiJson(book): ApiJson<Book>,
) -> CreateBookResponse {
    CreateBookResponse(state.inventory().create(book).await)
}
