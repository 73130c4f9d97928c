use axum::extract::State;

use crate::{extractor::path::ApiPath, state::ApiState, traits::InventoryProvider};

use super::{book_error, BookError, BookPath, BookResponse};

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(BookPath),
    responses(
        (status = 200, description = "The first book with the given id", body = crate::inventory::Book),
        (status = 404, description = "No book has the given id", body = crate::error::ApiErrorMessage),
    )
)]
pub async fn get_book(
    ApiPath(path): ApiPath<BookPath>,
    State(state): State<ApiState>,
) -> Result<BookResponse, BookError> {
    let book = state
        .inventory()
        .get(&path.id)
        .await
        .map_err(book_error(&state))?;

    Ok(BookResponse(book))
}
