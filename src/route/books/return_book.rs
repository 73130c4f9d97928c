use axum::extract::State;

use crate::{extractor::path::ApiPath, state::ApiState, traits::InventoryProvider};

use super::{book_error, BookError, BookPath, BookResponse};

/// Puts one copy of a book back. There is no upper bound on the quantity.
#[utoipa::path(
    patch,
    path = "/return/{id}",
    tag = "books",
    params(BookPath),
    responses(
        (status = 200, description = "The book with its quantity incremented", body = crate::inventory::Book),
        (status = 404, description = "No book has the given id", body = crate::error::ApiErrorMessage),
    )
)]
pub async fn return_book(
    ApiPath(path): ApiPath<BookPath>,
    State(state): State<ApiState>,
) -> Result<BookResponse, BookError> {
    let book = state
        .inventory()
        .return_book(&path.id)
        .await
        .map_err(book_error(&state))?;

    Ok(BookResponse(book))
}
