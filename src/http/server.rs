//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request timeout)
//! - Bind server to listener and stop on shutdown

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::BuilderConfig;
use crate::http::handlers;
use crate::lifecycle::ShutdownListener;
use crate::store::ValuesStore;

/// HTTP server for the values builder.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over `store`.
    pub fn new(config: &BuilderConfig, store: ValuesStore) -> Self {
        Self {
            router: Self::build_router(config, store),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &BuilderConfig, store: ValuesStore) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/api/values",
                get(handlers::get_values).put(handlers::put_values),
            )
            .route("/api/values/update", post(handlers::update_value))
            .route("/api/values/reset/{section}", post(handlers::reset_section))
            .route("/api/preview", get(handlers::preview))
            .route("/values.yaml", get(handlers::download))
            .with_state(store)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Router without a listener, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::values::default_values;

    fn server() -> HttpServer {
        HttpServer::new(&BuilderConfig::default(), ValuesStore::new(default_values()))
    }

    async fn body_text(res: axum::response::Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_update_then_preview() {
        let router = server().router();

        let res = router
            .clone()
            .oneshot(
                Request::post("/api/values/update")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"path":"image.tag","value":"0.21.0"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = router
            .oneshot(Request::get("/api/preview").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(body_text(res).await.contains("  tag: 0.21.0\n"));
    }

    #[tokio::test]
    async fn test_missing_value_clears_field() {
        let router = server().router();

        let res = router
            .clone()
            .oneshot(
                Request::post("/api/values/update")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"path":"image.pullPolicy"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = router
            .oneshot(Request::get("/values.yaml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(!body_text(res).await.contains("pullPolicy"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let res = server()
            .router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
