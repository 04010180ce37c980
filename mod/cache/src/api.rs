use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bodega_core::ServiceError;
use bodega_kv::KVStore;
use serde::Deserialize;

type AppState = Arc<dyn KVStore>;

pub fn router(kv: AppState) -> Router {
    Router::new()
        .route("/redis/get/{key}", get(get_value))
        .route("/redis/set", post(set_value))
        .with_state(kv)
}

#[derive(Debug, Deserialize)]
struct SetForm {
    key: String,
    value: String,
}

/// Look up a key. A miss is a normal response, not an error.
///
/// The stored bytes go into the body untouched; other clients may have
/// written values that are not valid UTF-8.
async fn get_value(
    State(kv): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ServiceError> {
    let value = kv
        .get(&key)
        .await
        .map_err(|e| ServiceError::Storage(e.to_string()))?;

    Ok(match value {
        Some(value) => {
            let mut body = key.into_bytes();
            body.extend_from_slice(b" : ");
            body.extend_from_slice(&value);
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
        }
        None => "key not found.".into_response(),
    })
}

async fn set_value(
    State(kv): State<AppState>,
    Form(form): Form<SetForm>,
) -> Result<&'static str, ServiceError> {
    kv.set(&form.key, form.value.as_bytes())
        .await
        .map_err(|e| ServiceError::Storage(e.to_string()))?;
    Ok("set value")
}
