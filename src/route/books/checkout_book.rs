use axum::extract::State;

use crate::{extractor::path::ApiPath, state::ApiState, traits::InventoryProvider};

use super::{book_error, BookError, BookPath, BookResponse};

/// Takes one copy of a book out of the store.
#[utoipa::path(
    patch,
    path = "/checkout/{id}",
    tag = "books",
    params(BookPath),
    responses(
        (status = 200, description = "The book with its quantity decremented", body = crate::inventory::Book),
        (status = 400, description = "No copies left", body = crate::error::ApiErrorMessage),
        (status = 404, description = "No book has the given id", body = crate::error::ApiErrorMessage),
    )
)]
pub async fn checkout_book(
    ApiPath(path): ApiPath<BookPath>,
    State(state): State<ApiState>,
) -> Result<BookResponse, BookError> {
    let book = state
        .inventory()
        .checkout(&path.id)
        .await
        .map_err(book_error(&state))?;

    Ok(BookResponse(book))
}
