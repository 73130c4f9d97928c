use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

const INDENT: &[u8] = b"    ";

/// Like [`axum::Json`], but renders the value indented by four spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> PrettyJson<T> {
    fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(128);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));

        self.0.serialize(&mut serializer)?;

        Ok(buf)
    }
}

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match self.to_vec() {
            Ok(buf) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json; charset=utf-8"),
                )],
                buf,
            )
                .into_response(),
            Err(err) => {
                tracing::error!(%err, "Failed to serialize response body");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("text/plain; charset=utf-8"),
                    )],
                    err.to_string(),
                )
                    .into_response()
            }
        }
    }
}
