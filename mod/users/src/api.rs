use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use bodega_blob::{BlobError, BlobStore};
use bodega_core::{JsonOrForm, ServiceError};
use serde::Deserialize;

use crate::model::User;

type AppState = Arc<dyn BlobStore>;

pub fn router(blob: AppState) -> Router {
    Router::new()
        .route("/users", post(create))
        .route("/users/{id}", get(show_user))
        .route("/show", get(show))
        .route("/save", post(save))
        .route("/multisave", post(multisave))
        .with_state(blob)
}

#[derive(Debug, Deserialize)]
struct ShowQuery {
    #[serde(default)]
    team: String,
    #[serde(default)]
    member: String,
}

/// Echo the id path segment back as plain text.
async fn show_user(Path(id): Path<String>) -> String {
    id
}

async fn show(Query(query): Query<ShowQuery>) -> String {
    format!("team:{}, member:{}", query.team, query.member)
}

/// Bind a user from either a JSON or a form body and echo it as JSON.
async fn create(JsonOrForm(user): JsonOrForm<User>) -> (StatusCode, Json<User>) {
    (StatusCode::CREATED, Json(user))
}

async fn save(Form(user): Form<User>) -> String {
    format!("name:{}, email:{}", user.name, user.email)
}

/// Accept a multipart submission with a `name` text part and an `avatar`
/// file part. The file is stored in the blob store under its original
/// file name.
async fn multisave(
    State(blob): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, ServiceError> {
    let mut name = String::new();
    let mut saved = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::Validation(e.to_string()))?
    {
        match field.name() {
            Some("name") => {
                name = field
                    .text()
                    .await
                    .map_err(|e| ServiceError::Validation(e.to_string()))?;
            }
            Some("avatar") => {
                // file_name has to be read before bytes() consumes the field
                let file_name = field.file_name().map(str::to_string).ok_or_else(|| {
                    ServiceError::Validation("avatar part has no file name".to_string())
                })?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServiceError::Validation(e.to_string()))?;
                blob.put(&file_name, &data).map_err(|e| match e {
                    BlobError::InvalidKey(_) => ServiceError::Validation(e.to_string()),
                    BlobError::Io(_) => ServiceError::Storage(e.to_string()),
                })?;
                saved = true;
            }
            _ => {}
        }
    }

    if !saved {
        return Err(ServiceError::Validation("missing avatar file".to_string()));
    }

    Ok(Html(format!("<b>Thank you! {}</b>", name)))
}
