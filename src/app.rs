use crate::{error::Result, modules, types::Context};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower_http::{cors, trace};

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {:?}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {:?}", err);
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

    tracing::info!("Shutdown signal received");
}

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    /// Registers every route up front; a bad binding fails here, before any
    /// listener is bound.
    pub fn new(ctx: Arc<Context>) -> Result<Self> {
        let router = Router::new()
            .nest("/api", modules::get_router()?)
            .fallback(not_found)
            .with_state(ctx.clone())
            .layer(DefaultBodyLimit::max(1024 * 1024))
            .layer(trace::TraceLayer::new_for_http())
            .layer(
                cors::CorsLayer::new()
                    .allow_methods([Method::OPTIONS, Method::GET, Method::POST])
                    .allow_headers([header::CONTENT_TYPE])
                    .allow_origin(cors::Any),
            );

        Ok(Self { ctx, router })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn serve(self) -> Result<()> {
        let listener =
            TcpListener::bind(format!("{}:{}", self.ctx.app.host, self.ctx.app.port)).await?;

        self.serve_on(listener).await
    }

    pub async fn serve_on(self, listener: TcpListener) -> Result<()> {
        tracing::info!("App is running on {}", listener.local_addr()?);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("App stopped");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{Config, ToContext};
    use axum::{body::Body, extract::Request};
    use tower::ServiceExt;

    async fn app() -> App {
        let config = Config::from_lookup(|var| match var {
            "BITBUCKET_APP_KEY" => Some(String::from("codehooks")),
            _ => None,
        })
        .unwrap();

        App::new(Arc::new(config.to_context().await)).unwrap()
    }

    async fn send(method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let res = app().await.router().oneshot(req).await.unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&body).unwrap_or_default())
    }

    #[tokio::test]
    async fn should_answer_health_check() {
        let (status, body) = send(Method::GET, "/api").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome to Codehooks API");
    }

    #[tokio::test]
    async fn should_mount_bitbucket_descriptor() {
        let (status, body) = send(Method::GET, "/api/webhooks/bitbucket").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["key"], "codehooks");
        assert_eq!(body["baseUrl"], "http://0.0.0.0:8000/api/webhooks/bitbucket");
    }

    #[tokio::test]
    async fn should_fall_back_to_json_not_found_for_events() {
        let (status, body) = send(Method::POST, "/api/webhooks/bitbucket/events").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Route not found");
    }

    #[tokio::test]
    async fn should_reject_post_on_configure_route() {
        let (status, _) = send(Method::POST, "/api/webhooks/bitbucket").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
