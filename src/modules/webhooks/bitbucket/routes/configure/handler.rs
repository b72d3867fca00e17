use super::{service::service, types::request};
use crate::types::Context;
use axum::{
    extract::{OriginalUri, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    OriginalUri(uri): OriginalUri,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            mount_path: uri.path().trim_end_matches('/').to_string(),
        },
    )
    .await
}
