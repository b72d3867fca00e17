pub mod configure;

use crate::{
    types::Context,
    utils::registrar::{RegistrationError, RouteRegistrar},
};
use axum::{handler::Handler, http::Method, routing::Router};
use std::sync::Arc;

/// Delegates backing the Bitbucket routes.
pub struct Handlers<C> {
    pub configure: C,
}

pub fn register_routes<C, T>(
    registrar: &mut RouteRegistrar<Arc<Context>>,
    handlers: Handlers<C>,
) -> Result<(), RegistrationError>
where
    C: Handler<T, Arc<Context>>,
    T: 'static,
{
    registrar.register(Method::GET, "/", handlers.configure)?;
    // POST /events stays unbound until event delivery is implemented.

    Ok(())
}

pub fn get_router() -> Result<Router<Arc<Context>>, RegistrationError> {
    let mut registrar = RouteRegistrar::new();

    register_routes(
        &mut registrar,
        Handlers {
            configure: configure::handler,
        },
    )?;

    registrar.seal()
}
