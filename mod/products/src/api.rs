use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, State},
    routing::{get, post},
};
use bodega_core::ServiceError;
use serde::Deserialize;

use crate::service::ProductService;

type AppState = Arc<ProductService>;

pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/products/migrate", get(migrate))
        .route("/products/register", post(register))
        .route("/products/update", post(update))
        .route("/products/delete", post(delete))
        .route("/products/{id}", get(show))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct RegisterForm {
    code: String,
    price: u64,
}

#[derive(Debug, Deserialize)]
struct UpdateForm {
    id: String,
    price: u64,
}

#[derive(Debug, Deserialize)]
struct DeleteForm {
    id: String,
}

async fn migrate(State(service): State<AppState>) -> Result<&'static str, ServiceError> {
    service.migrate()?;
    Ok("migrated")
}

async fn register(
    State(service): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<&'static str, ServiceError> {
    service.register(form.code, form.price)?;
    Ok("register product.")
}

async fn show(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, ServiceError> {
    let product = service.get(&id)?;
    Ok(format!("code: {}, price: {}", product.code, product.price))
}

async fn update(
    State(service): State<AppState>,
    Form(form): Form<UpdateForm>,
) -> Result<&'static str, ServiceError> {
    service.update_price(&form.id, form.price)?;
    Ok("updated.")
}

async fn delete(
    State(service): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<&'static str, ServiceError> {
    service.delete(&form.id)?;
    Ok("deleted.")
}
