use super::types::{request, response};
use crate::types::Context;
use std::sync::Arc;

fn build_descriptor(ctx: &Context, mount_path: &str) -> response::Descriptor {
    response::Descriptor {
        key: ctx.bitbucket.app_key.clone(),
        name: ctx.bitbucket.app_name.clone(),
        description: ctx.bitbucket.app_description.clone(),
        vendor: response::Vendor {
            name: ctx.bitbucket.vendor_name.clone(),
            url: ctx.bitbucket.vendor_url.clone(),
        },
        base_url: format!("{}{}", ctx.app.url, mount_path),
        authentication: response::Authentication {
            r#type: String::from("jwt"),
        },
        scopes: ctx.bitbucket.scopes.clone(),
        contexts: vec![String::from("account")],
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Success {
    let descriptor = build_descriptor(&ctx, &payload.mount_path);

    tracing::info!(
        "Serving Bitbucket descriptor for {} at {}",
        descriptor.key,
        descriptor.base_url
    );

    response::Success::Descriptor(descriptor)
}
