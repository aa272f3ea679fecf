use thiserror::Error;

/// Errors from parsing a route path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route for path: {0}")]
    NotFound(String),
}
