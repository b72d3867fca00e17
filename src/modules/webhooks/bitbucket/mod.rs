pub mod routes;

pub use routes::{get_router, register_routes, Handlers};
