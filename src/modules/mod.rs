pub mod webhooks;

mod router;
pub use router::get_router;
