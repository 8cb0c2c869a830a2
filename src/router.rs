//! Radix-tree request router.
//!
//! One tree per HTTP method plus one method-agnostic tree for handlers that
//! dispatch on the method themselves. Method-specific routes win over
//! method-agnostic ones for the same path.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Registration methods return `self` so they chain.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    any: MatchitRouter<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), any: MatchitRouter::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Paths use `matchit` syntax: `{name}` matches one segment and
    /// `{*name}` the rest of the path. Handlers read the path itself through
    /// [`Request::path`].
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an existing route.
    /// Routes are fixed at startup, so this is a programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        insert(self.routes.entry(method).or_default(), path, handler);
        self
    }

    /// Shorthand for `on(Method::Get, …)`.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    /// Register a handler for every method on `path`. The handler sees the
    /// request method through [`Request::method`].
    pub fn any(mut self, path: &str, handler: impl Handler) -> Self {
        insert(&mut self.any, path, handler);
        self
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Option<BoxedHandler> {
        let matched = self.routes.get(&method)
            .and_then(|tree| tree.at(path).ok())
            .or_else(|| self.any.at(path).ok())?;
        Some(Arc::clone(matched.value))
    }

    /// Routes one request to its handler; unmatched requests get a bare `404`.
    pub(crate) async fn handle(&self, req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some(handler) => handler.call(req).await,
            None => Response::status(Status::NotFound),
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

fn insert(tree: &mut MatchitRouter<BoxedHandler>, path: &str, handler: impl Handler) {
    tree.insert(path, handler.into_boxed_handler())
        .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
}
