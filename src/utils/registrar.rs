use axum::{
    handler::Handler,
    http::Method,
    routing::{on, MethodFilter},
    Router,
};
use matchit::InsertError;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("invalid route path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },
    #[error("unsupported method {0}")]
    UnsupportedMethod(Method),
    #[error("{method} {path} is already registered")]
    Duplicate { method: Method, path: String },
    #[error("{path} conflicts with the registered route {existing}")]
    Conflict { path: String, existing: String },
    #[error("routes are sealed, no further registration is possible")]
    Sealed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub method: Method,
    pub path: String,
}

/// Collects method+path bindings onto a router before it starts serving.
///
/// Unlike `Router::route`, which panics on overlapping routes, every
/// registration returns a [`RegistrationError`] the caller can propagate.
/// Paths are first inserted into a shadow `matchit` router, the same matcher
/// axum routes with, so its conflict rules are checked before axum sees them.
/// Once [`RouteRegistrar::seal`] hands the router out, the registrar rejects
/// any further registration.
pub struct RouteRegistrar<S = ()> {
    router: Router<S>,
    shadow: matchit::Router<()>,
    bindings: Vec<Binding>,
    sealed: bool,
}

impl<S> RouteRegistrar<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            shadow: matchit::Router::new(),
            bindings: vec![],
            sealed: false,
        }
    }

    pub fn register<H, T>(
        &mut self,
        method: Method,
        path: &str,
        delegate: H,
    ) -> Result<(), RegistrationError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if self.sealed {
            return Err(RegistrationError::Sealed);
        }

        validate_path(path)?;

        let filter = MethodFilter::try_from(method.clone())
            .map_err(|_| RegistrationError::UnsupportedMethod(method.clone()))?;

        let known_path = self.bindings.iter().any(|binding| binding.path == path);
        if self
            .bindings
            .iter()
            .any(|binding| binding.path == path && binding.method == method)
        {
            return Err(RegistrationError::Duplicate {
                method,
                path: path.to_string(),
            });
        }

        // same path with another method merges into the existing method router
        if !known_path {
            self.shadow
                .insert(path, ())
                .map_err(|err| match err {
                    InsertError::Conflict { with } => RegistrationError::Conflict {
                        path: path.to_string(),
                        existing: with,
                    },
                    err => RegistrationError::InvalidPath {
                        path: path.to_string(),
                        reason: err.to_string(),
                    },
                })?;
        }

        let router = std::mem::take(&mut self.router);
        self.router = router.route(path, on(filter, delegate));

        tracing::debug!("Registered route {} {}", method, path);
        self.bindings.push(Binding {
            method,
            path: path.to_string(),
        });

        Ok(())
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn seal(&mut self) -> Result<Router<S>, RegistrationError> {
        if self.sealed {
            return Err(RegistrationError::Sealed);
        }

        self.sealed = true;
        tracing::debug!("Sealed {} route(s)", self.bindings.len());

        Ok(std::mem::take(&mut self.router))
    }
}

impl<S> Default for RouteRegistrar<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

fn validate_path(path: &str) -> Result<(), RegistrationError> {
    let invalid = |reason: &str| {
        Err(RegistrationError::InvalidPath {
            path: path.to_string(),
            reason: String::from(reason),
        })
    };

    if path.is_empty() {
        return invalid("path is empty");
    }

    if !path.starts_with('/') {
        return invalid("path must start with '/'");
    }

    if path == "/" {
        return Ok(());
    }

    let segments = path[1..].split('/').collect::<Vec<_>>();
    let last = segments.len() - 1;

    for (index, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            // a single trailing slash is a distinct route, anything else is a typo
            if index == last {
                continue;
            }
            return invalid("path contains an empty segment");
        }

        if let Some(name) = segment.strip_prefix(':') {
            if name.is_empty() {
                return invalid("parameter segment has no name");
            }
        }

        if let Some(name) = segment.strip_prefix('*') {
            if name.is_empty() {
                return invalid("wildcard segment has no name");
            }
            if index != last {
                return invalid("wildcard must be the last segment");
            }
        }
    }

    Ok(())
}
