use axum::{
    async_trait,
    extract::{FromRequest, Json as AxumJson, Request},
};
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::{
    error::{ApiError, BodyError, InternalServerError},
    traits::ErrorVerbosityProvider,
};

/// A Wrapper around [`axum::extract::Json`] that rejects with an [`ApiError`].
///
/// Extracts the request body as JSON consuming the request.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + JsonSchema + Debug + Send,
    S: Send + Sync + ErrorVerbosityProvider,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "json_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = AxumJson::<T>::from_request(req, state).await;

        match json {
            Ok(json) => {
                tracing::trace!(json=?json.0, "Extracted");

                Ok(ApiJson(json.0))
            }
            Err(json_rejection) => {
                tracing::warn!(rejection=?json_rejection, "Rejection");

                let verbosity = state.error_verbosity();

                let body_error_reason = json_rejection.body_text();

                let body_expected_schema = serde_yaml::to_string(&schema_for!(T))
                    .map_err(|err| InternalServerError::from_generic_error(verbosity, err))?;

                Err(BodyError::new(verbosity, body_error_reason, body_expected_schema).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, StatusCode},
        response::IntoResponse,
    };

    use super::*;
    use crate::{
        error::ErrorVerbosity,
        inventory::{Book, Inventory},
        state::ApiState,
    };

    fn request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn extracts_a_book() {
        let state = ApiState::new(ErrorVerbosity::Full, Inventory::new());
        let req = request(r#"{"id":"7","title":"Ulysses","author":"James Joyce","quantity":1}"#);

        let ApiJson(book) = ApiJson::<Book>::from_request(req, &state)
            .await
            .unwrap_or_else(|_| panic!("Book was rejected"));

        assert_eq!(book, Book::new("7", "Ulysses", "James Joyce", 1));
    }

    #[tokio::test]
    async fn rejects_a_malformed_book_with_bad_request() {
        let state = ApiState::new(ErrorVerbosity::Message, Inventory::new());
        let req = request(r#"{"id":7}"#);

        let rejection = match ApiJson::<Book>::from_request(req, &state).await {
            Ok(_) => panic!("Malformed book was extracted"),
            Err(rejection) => rejection,
        };

        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
