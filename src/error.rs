use std::borrow::Cow;

use axum::{
    extract::rejection::PathRejection,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use derive_more::From;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pretty_json::PrettyJson;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ErrorVerbosity {
    /// Server returns an empty response with [`StatusCode::NO_CONTENT`] for all errors.
    None,
    /// Server returns only the appropriate status code.
    StatusCode,
    /// Server returns only the message with the appropriate status code.
    #[default]
    Message,
    /// Server returns the message, the error type with cleared error content and the appropriate status code.
    Type,
    /// Server returns the message, the error type with the error content and the appropriate status code.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_message(&self) -> bool {
        matches!(
            self,
            ErrorVerbosity::Message | ErrorVerbosity::Type | ErrorVerbosity::Full
        )
    }

    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

/// Body of an error response at [`ErrorVerbosity::Message`].
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorMessage {
    /// Human readable description of the error.
    #[schema(example = "Book with id 42 not found")]
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    #[serde(flatten)]
    error: ApiError,
    message: &'static str,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status_code = self.error.status_code();

        match self.error.verbosity() {
            ErrorVerbosity::None => StatusCode::NO_CONTENT.into_response(),
            ErrorVerbosity::StatusCode => status_code.into_response(),
            ErrorVerbosity::Message => {
                let message = ApiErrorMessage {
                    message: self.message.to_string(),
                };

                (status_code, PrettyJson(message)).into_response()
            }
            ErrorVerbosity::Type | ErrorVerbosity::Full => {
                (status_code, PrettyJson(self)).into_response()
            }
        }
    }
}

#[derive(Debug, From, Serialize)]
#[serde(tag = "error_type", content = "error")]
/// API error
pub enum ApiError {
    /// Internal server error
    ///
    /// This error is returned when an internal server error occurs.
    InternalServerError(InternalServerError),
    /// Body error
    ///
    /// This error is returned when the body is not as expected.
    Body(BodyError),
    /// Path error
    ///
    /// This error is returned when the path is not as expected.
    Path(PathError),
    /// Method not allowed
    ///
    /// This error is returned when the method is not allowed.
    MethodNotAllowed(MethodNotAllowedError),
    /// Not found error
    ///
    /// This error is returned when the requested route does not exist.
    NotFound(NotFoundError),
}

impl ApiError {
    fn verbosity(&self) -> ErrorVerbosity {
        match self {
            ApiError::InternalServerError(err) => err.verbosity,
            ApiError::Body(err) => err.verbosity,
            ApiError::Path(err) => err.verbosity,
            ApiError::MethodNotAllowed(err) => err.verbosity,
            ApiError::NotFound(err) => err.verbosity,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "An internal server error has occurred",
            ApiError::Body(_) => "Failed to parse request body",
            ApiError::Path(_) => "Failed to parse path parameters",
            ApiError::MethodNotAllowed(_) => "Method not allowed",
            ApiError::NotFound(_) => "The requested resource was not found",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(_) | ApiError::Path(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        let message = match error.verbosity().should_generate_message() {
            true => error.message(),
            false => "",
        };

        ApiErrorResponse { error, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiErrorResponse::from(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct InternalServerError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(verbosity: ErrorVerbosity, err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then_some(err);

        InternalServerError {
            verbosity,
            internal_server_error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BodyError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    body_error_reason: Option<String>,
    body_expected_schema: Option<String>,
}

impl BodyError {
    pub fn new(
        verbosity: ErrorVerbosity,
        body_error_reason: String,
        body_expected_schema: String,
    ) -> Self {
        let (body_error_reason, body_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (Some(body_error_reason), Some(body_expected_schema)),
                false => (None, None),
            };

        BodyError {
            verbosity,
            body_error_reason,
            body_expected_schema,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PathError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    path_error_reason: Option<String>,
}

impl PathError {
    pub fn new(verbosity: ErrorVerbosity, path_error_reason: String) -> Self {
        let path_error_reason = verbosity
            .should_generate_error_reason()
            .then_some(path_error_reason);

        PathError {
            verbosity,
            path_error_reason,
        }
    }

    pub fn from_path_rejection(verbosity: ErrorVerbosity, rejection: PathRejection) -> ApiError {
        PathError::new(verbosity, rejection.body_text()).into()
    }
}

#[derive(Debug, Serialize)]
pub struct MethodNotAllowedError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl MethodNotAllowedError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        MethodNotAllowedError { verbosity }
    }
}

#[derive(Debug, Serialize)]
pub struct NotFoundError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl NotFoundError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        NotFoundError { verbosity }
    }
}

/// Describes an error kind that belongs to a single resource, e.g. a book.
///
/// Unlike [`ApiError`], which covers failures of the HTTP plumbing, a resource
/// error carries a message built from the request (e.g. the requested id).
pub trait ResourceErrorProvider {
    type Context: Serialize;

    fn headers(&self) -> Option<HeaderMap>;

    fn status_code(&self) -> StatusCode;

    fn message(&self) -> Cow<'static, str>;

    /// Details rendered only at [`ErrorVerbosity::Full`].
    fn context(&self) -> Self::Context;
}

#[derive(Debug)]
pub struct ResourceError<T> {
    verbosity: ErrorVerbosity,
    error_type: T,
}

impl<T> ResourceError<T> {
    pub fn new(verbosity: ErrorVerbosity, error_type: T) -> Self {
        Self {
            verbosity,
            error_type,
        }
    }
}

#[derive(Serialize)]
struct ResourceErrorResponse<'a, T, C> {
    #[serde(flatten)]
    error_type: &'a T,
    message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<C>,
}

impl<T> IntoResponse for ResourceError<T>
where
    T: ResourceErrorProvider + Serialize,
{
    fn into_response(self) -> Response {
        let status_code = self.error_type.status_code();
        let headers = self.error_type.headers().unwrap_or_default();

        match self.verbosity {
            ErrorVerbosity::None => StatusCode::NO_CONTENT.into_response(),
            ErrorVerbosity::StatusCode => (status_code, headers).into_response(),
            ErrorVerbosity::Message => {
                let message = ApiErrorMessage {
                    message: self.error_type.message().into_owned(),
                };

                (status_code, headers, PrettyJson(message)).into_response()
            }
            ErrorVerbosity::Type => {
                let response = ResourceErrorResponse::<T, T::Context> {
                    error_type: &self.error_type,
                    message: self.error_type.message(),
                    error: None,
                };

                (status_code, headers, PrettyJson(response)).into_response()
            }
            ErrorVerbosity::Full => {
                let response = ResourceErrorResponse {
                    error_type: &self.error_type,
                    message: self.error_type.message(),
                    error: Some(self.error_type.context()),
                };

                (status_code, headers, PrettyJson(response)).into_response()
            }
        }
    }
}
