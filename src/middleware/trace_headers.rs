use axum::{extract::Request, middleware::Next, response::Response};

/// Middlware to trace request and response headers.
pub async fn trace_headers(req: Request, next: Next) -> Response {
    let incoming_headers = req.headers();
    tracing::trace!(method = %req.method(), uri = %req.uri(), ?incoming_headers, "Request headers");

    let response = next.run(req).await;

    let outgoing_headers = response.headers();
    tracing::trace!(status = %response.status(), ?outgoing_headers, "Response headers");

    response
}
