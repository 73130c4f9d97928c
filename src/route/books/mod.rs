use std::borrow::Cow;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::{
    error::{ResourceError, ResourceErrorProvider},
    inventory::{Book, InventoryError},
    pretty_json::PrettyJson,
    traits::ErrorVerbosityProvider,
};

pub mod app;
pub mod checkout_book;
pub mod create_book;
pub mod get_book;
pub mod list_books;
pub mod return_book;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct BookPath {
    /// Book identifier, compared case-sensitively.
    pub id: String,
}

/// A single book with [`StatusCode::OK`].
#[derive(Debug)]
pub struct BookResponse(pub Book);

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, PrettyJson(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum BookErrorType {
    NotFound {
        #[serde(skip)]
        id: String,
    },
    Unavailable {
        #[serde(skip)]
        id: String,
        #[serde(skip)]
        quantity: i64,
    },
}

#[derive(Debug, Serialize)]
pub struct BookErrorContext {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    pub reason: String,
}

impl ResourceErrorProvider for BookErrorType {
    type Context = BookErrorContext;

    fn headers(&self) -> Option<HeaderMap> {
        None
    }

    fn status_code(&self) -> StatusCode {
        match self {
            BookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
            BookErrorType::Unavailable { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> Cow<'static, str> {
        match self {
            BookErrorType::NotFound { id } => Cow::Owned(format!("Book with id {id} not found")),
            BookErrorType::Unavailable { .. } => Cow::Borrowed("No more of this book"),
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            BookErrorType::NotFound { id } => BookErrorContext {
                id: id.clone(),
                quantity: None,
                reason: format!("No book has the id {id}"),
            },
            BookErrorType::Unavailable { id, quantity } => BookErrorContext {
                id: id.clone(),
                quantity: Some(*quantity),
                reason: format!("Book with id {id} has {quantity} copies left"),
            },
        }
    }
}

impl From<InventoryError> for BookErrorType {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NotFound { id } => BookErrorType::NotFound { id },
            InventoryError::Unavailable { id, quantity } => {
                BookErrorType::Unavailable { id, quantity }
            }
        }
    }
}

pub type BookError = ResourceError<BookErrorType>;

/// Maps store failures of a request to a [`BookError`] rendered with the state's verbosity.
pub fn book_error<S: ErrorVerbosityProvider>(
    state: &S,
) -> impl FnOnce(InventoryError) -> BookError {
    let verbosity = state.error_verbosity();

    move |err| {
        tracing::warn!(%err, "Rejection");

        ResourceError::new(verbosity, err.into())
    }
}
