use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json, RequestExt};

/// Extractor that binds a request body as JSON or urlencoded form,
/// dispatched on the Content-Type header.
///
/// Handlers that accept client-chosen encodings take `JsonOrForm<T>`
/// instead of committing to `Json<T>` or `Form<T>`. Unsupported content
/// types are rejected with 415; malformed bodies get the framework's
/// default rejection for the matched encoding.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<()>,
    Form<T>: FromRequest<()>,
    T: 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.starts_with("application/json") {
            let Json(payload) = req.extract().await.map_err(IntoResponse::into_response)?;
            return Ok(Self(payload));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(payload) = req.extract().await.map_err(IntoResponse::into_response)?;
            return Ok(Self(payload));
        }

        Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response())
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::JsonOrForm;

    #[derive(Deserialize)]
    struct Payload {
        #[serde(default)]
        name: String,
        #[serde(default)]
        email: String,
    }

    async fn submit(JsonOrForm(p): JsonOrForm<Payload>) -> String {
        format!("{}|{}", p.name, p.email)
    }

    fn app() -> Router {
        Router::new().route("/submit", post(submit))
    }

    #[tokio::test]
    async fn binds_json_body() {
        let req = Request::builder()
            .method("POST")
            .uri("/submit")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Joe","email":"joe@example.com"}"#))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Joe|joe@example.com");
    }

    #[tokio::test]
    async fn binds_form_body() {
        let req = Request::builder()
            .method("POST")
            .uri("/submit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("name=Joe&email=joe%40example.com"))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Joe|joe@example.com");
    }

    #[tokio::test]
    async fn missing_fields_bind_empty() {
        let req = Request::builder()
            .method("POST")
            .uri("/submit")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Joe"}"#))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Joe|");
    }

    #[tokio::test]
    async fn rejects_unknown_content_type() {
        let req = Request::builder()
            .method("POST")
            .uri("/submit")
            .header("content-type", "text/plain")
            .body(Body::from("name=Joe"))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
