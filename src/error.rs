use crate::{types::ConfigError, utils::registrar::RegistrationError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("route registration failed: {0}")]
    Registration(#[from] RegistrationError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
