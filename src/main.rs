use codehooks_api_rs::{
    app::App,
    error::Result,
    types::{Config, Context, ToContext},
};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env().map_err(|err| {
        tracing::error!("Failed to load config: {}", err);
        err
    })?;
    let ctx: Arc<Context> = Arc::new(config.to_context().await);

    let app = App::new(ctx).map_err(|err| {
        tracing::error!("Failed to build app: {}", err);
        err
    })?;

    app.serve().await
}
