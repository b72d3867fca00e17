use super::webhooks;
use crate::{
    types::Context,
    utils::registrar::{RegistrationError, RouteRegistrar},
};
use axum::{
    http::{Method, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "message": "Welcome to Codehooks API" })),
    )
}

pub fn get_router() -> Result<Router<Arc<Context>>, RegistrationError> {
    let mut registrar = RouteRegistrar::new();
    registrar.register(Method::GET, "/", health_check)?;

    Ok(registrar
        .seal()?
        .nest("/webhooks", webhooks::get_router()?))
}
