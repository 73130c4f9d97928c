use std::{
    any::Any,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
};

use anyhow::Context;
use axum::{
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::{
    error::{ApiError, ErrorVerbosity, InternalServerError},
    inventory::Inventory,
    middleware::{
        method_not_allowed::method_not_allowed, not_found::not_found,
        trace_headers::trace_headers, trace_response_body::trace_response_body,
    },
    route,
    state::ApiState,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    socket_address: SocketAddr,
    error_verbosity: ErrorVerbosity,
    /// Start with the three seed books instead of an empty store.
    seed_books: bool,
    trace_response_body: bool,
    api_docs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            socket_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080),
            error_verbosity: ErrorVerbosity::default(),
            seed_books: true,
            trace_response_body: false,
            api_docs: true,
        }
    }
}

impl ServerConfig {
    pub async fn from_config_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn with_socket_address(mut self, socket_address: SocketAddr) -> Self {
        self.socket_address = socket_address;
        self
    }

    pub fn with_error_verbosity(mut self, error_verbosity: ErrorVerbosity) -> Self {
        self.error_verbosity = error_verbosity;
        self
    }

    pub fn with_seed_books(mut self, seed_books: bool) -> Self {
        self.seed_books = seed_books;
        self
    }

    pub fn with_trace_response_body(mut self, trace_response_body: bool) -> Self {
        self.trace_response_body = trace_response_body;
        self
    }

    pub fn with_api_docs(mut self, api_docs: bool) -> Self {
        self.api_docs = api_docs;
        self
    }
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Builds the application with a fresh store.
    pub fn router(&self) -> Router {
        let inventory = match self.config.seed_books {
            true => Inventory::seeded(),
            false => Inventory::new(),
        };

        let state = ApiState::new(self.config.error_verbosity, inventory);

        self.app(state)
    }

    fn app(&self, state: ApiState) -> Router {
        let verbosity = self.config.error_verbosity;

        let mut app = Router::new().merge(route::books::app::app());

        if self.config.api_docs {
            app = app.merge(route::docs::app::app());
        }

        let mut app = app
            .fallback(not_found::<ApiState>)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                method_not_allowed::<ApiState>,
            ));

        app = app.layer(middleware::from_fn(trace_headers));

        if self.config.trace_response_body {
            app = app.layer(middleware::from_fn_with_state(
                state.clone(),
                trace_response_body::<ApiState>,
            ));
        }

        app.with_state(state).layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                )
                .layer(CatchPanicLayer::custom(
                    move |panic: Box<dyn Any + Send + 'static>| panic_response(verbosity, panic),
                ))
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        self.serve(listener).await
    }

    /// Serves on an already bound listener until CTRL+C or SIGTERM.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        let app = self.router();

        if let Ok(addr) = listener.local_addr() {
            tracing::info!(%addr, "Listening");
        }

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

fn panic_response(verbosity: ErrorVerbosity, panic: Box<dyn Any + Send + 'static>) -> Response {
    let reason = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown reason");

    let err = anyhow::anyhow!("Handler panicked: {reason}");

    ApiError::from(InternalServerError::from_generic_error(verbosity, err)).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("CTRL+C received"),
            Err(err) => {
                tracing::error!(%err, "Failed to install CTRL+C signal handler");

                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;

                tracing::info!("SIGTERM received");
            }
            Err(err) => {
                tracing::error!(%err, "Failed to install SIGTERM signal handler");

                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    use super::*;

    async fn into_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn panics_become_internal_server_errors() {
        let (status, body) = into_json(panic_response(ErrorVerbosity::Full, Box::new("boom"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error_type"], "InternalServerError");
        assert_eq!(
            body["error"]["internal_server_error"],
            "Handler panicked: boom"
        );
    }

    #[tokio::test]
    async fn panic_with_formatted_message_keeps_reason() {
        let panic = Box::new(format!("index {} out of range", 3));

        let (status, body) = into_json(panic_response(ErrorVerbosity::Full, panic)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"]["internal_server_error"],
            "Handler panicked: index 3 out of range"
        );
    }

    #[tokio::test]
    async fn panic_message_hides_reason() {
        let (status, body) =
            into_json(panic_response(ErrorVerbosity::Message, Box::new("boom"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "message": "An internal server error has occurred" })
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: ServerConfig = serde_yaml::from_str("error_verbosity: Full\n").unwrap();

        assert_eq!(config.error_verbosity, ErrorVerbosity::Full);
        assert_eq!(config.socket_address, ServerConfig::default().socket_address);
        assert!(config.seed_books);
        assert!(config.api_docs);
        assert!(!config.trace_response_body);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = serde_yaml::from_str::<ServerConfig>("socket_adress: 0.0.0.0:80\n");

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn missing_config_file_is_an_error() {
        let err = ServerConfig::from_config_file("does-not-exist.yaml")
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("does-not-exist.yaml"));
    }
}
