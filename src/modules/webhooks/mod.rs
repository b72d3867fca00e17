pub mod bitbucket;

use crate::{types::Context, utils::registrar::RegistrationError};
use axum::Router;
use std::sync::Arc;

pub fn get_router() -> Result<Router<Arc<Context>>, RegistrationError> {
    Ok(Router::new().nest("/bitbucket", bitbucket::get_router()?))
}
