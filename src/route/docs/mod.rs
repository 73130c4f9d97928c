use utoipa::OpenApi;

use crate::{error::ApiErrorMessage, inventory::Book};

use super::books::{checkout_book, create_book, get_book, list_books, return_book};

pub mod app;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore",
        description = "In-memory bookstore inventory: list, add, check out and return books."
    ),
    paths(
        list_books::list_books,
        get_book::get_book,
        create_book::create_book,
        checkout_book::checkout_book,
        return_book::return_book,
    ),
    components(schemas(Book, ApiErrorMessage)),
    tags((name = "books", description = "Book inventory"))
)]
pub struct ApiDoc;
