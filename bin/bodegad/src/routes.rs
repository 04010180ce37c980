//! Route registration — collects all module routes + system endpoints.

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::auth_middleware::{self, AdminAuth};
use crate::config::ServerConfig;

/// Application shared state.
#[derive(Clone)]
pub struct AppState {
    pub server_config: Arc<ServerConfig>,
}

/// Build the complete router with all routes.
pub fn build_router(state: AppState, module_routes: Vec<(&str, Router)>) -> Router {
    let admin = Arc::new(AdminAuth {
        username: state.server_config.admin.username.clone(),
        password: state.server_config.admin.password.clone(),
    });

    // System endpoints.
    let system_routes = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    // Admin group. Auth is applied after track, so it runs first.
    let admin_routes = Router::new()
        .route("/users", get(admin_users))
        .route_layer(middleware::from_fn(track))
        .route_layer(middleware::from_fn_with_state(
            admin,
            auth_middleware::basic_auth,
        ));

    let mut app = Router::new()
        .route("/", get(hello))
        .route("/middle", get(middle).route_layer(middleware::from_fn(track)))
        .nest("/xxx", admin_routes)
        .merge(system_routes);

    // Module routes carry absolute paths, so merge rather than nest.
    for (name, router) in module_routes {
        debug!("mounting {} routes", name);
        app = app.merge(router);
    }

    app.nest_service(
        "/static",
        ServeDir::new(&state.server_config.storage.static_dir),
    )
    .layer(TraceLayer::new_for_http())
}

/// Request tracking middleware, applied to selected routes.
async fn track(request: Request, next: Next) -> Response {
    info!("request to {}", request.uri().path());
    next.run(request).await
}

async fn hello() -> &'static str {
    "Hello, World!"
}

async fn middle() -> &'static str {
    "/middle"
}

async fn admin_users() -> &'static str {
    "/admin/users"
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "bodegad",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use bodega_core::Module;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState {
            server_config: Arc::new(ServerConfig::default()),
        }
    }

    async fn send(router: Router, req: Request<Body>) -> (StatusCode, String) {
        let resp = router.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn root_says_hello() {
        let router = build_router(state(), vec![]);
        let (status, body) = send(router, get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Hello, World!");
    }

    #[tokio::test]
    async fn middle_echoes_its_path() {
        let router = build_router(state(), vec![]);
        let (status, body) = send(router, get_request("/middle")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "/middle");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let router = build_router(state(), vec![]);
        let (status, body) = send(router, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn version_reports_name_and_version() {
        let router = build_router(state(), vec![]);
        let (status, body) = send(router, get_request("/version")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("bodegad"));
        assert!(body.contains(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn admin_group_requires_credentials() {
        let router = build_router(state(), vec![]);
        let (status, _) = send(router, get_request("/xxx/users")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_group_accepts_configured_credentials() {
        let router = build_router(state(), vec![]);
        let req = Request::builder()
            .uri("/xxx/users")
            .header(
                header::AUTHORIZATION,
                format!("Basic {}", BASE64.encode("joe:secret")),
            )
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "/admin/users");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let router = build_router(state(), vec![]);
        let (status, _) = send(router, get_request("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn module_routes_are_merged() {
        let dir = tempfile::tempdir().unwrap();
        let blob: Arc<dyn bodega_blob::BlobStore> =
            Arc::new(bodega_blob::FileStore::open(dir.path()).unwrap());
        let module = users::UsersModule::new(blob);

        let router = build_router(state(), vec![(module.name(), module.routes())]);
        let (status, body) = send(router, get_request("/show?team=a&member=b")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "team:a, member:b");
    }

    #[tokio::test]
    async fn static_mount_serves_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hello.txt"), "static hello").unwrap();

        let mut config = ServerConfig::default();
        config.storage.static_dir = dir.path().display().to_string();
        let state = AppState {
            server_config: Arc::new(config),
        };

        let router = build_router(state, vec![]);
        let (status, body) = send(router, get_request("/static/hello.txt")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "static hello");
    }

    #[tokio::test]
    async fn static_mount_misses_with_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default();
        config.storage.static_dir = dir.path().display().to_string();
        let state = AppState {
            server_config: Arc::new(config),
        };

        let router = build_router(state, vec![]);
        let (status, _) = send(router, get_request("/static/absent.txt")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
