use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{inventory::Book, pretty_json::PrettyJson, state::ApiState, traits::InventoryProvider};

#[derive(Debug)]
pub struct ListBooksResponse(pub Vec<Book>);

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, PrettyJson(self.0)).into_response()
    }
}

/// Lists every book in insertion order.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in insertion order", body = [Book]),
    )
)]
pub async fn list_books(State(state): State<ApiState>) -> ListBooksResponse {
    ListBooksResponse(state.inventory().list().await)
}
