//! Route table.
//!
//! A [`Dispatcher`] maps exact paths to [`Resource`]s. It rejects unknown
//! paths (404) and methods a resource does not declare (405) before any
//! handler runs; everything else, including every side effect, happens in
//! the handler.

use alloc::boxed::Box;
use alloc::vec::Vec;

use stick_platform::{Method, Request, Response};

use super::reply::{status, HandlerError, Reply};

/// Result of one handler call.
pub type HandlerResult = Result<Reply, HandlerError>;

/// One addressable admin resource.
///
/// `C` is the shared context every handler receives by reference.
pub trait Resource<C> {
    /// Methods this resource answers.
    fn methods(&self) -> &'static [Method];

    /// Answer a GET.
    fn get(&self, _ctx: &mut C) -> HandlerResult {
        Err(HandlerError::MethodNotAllowed)
    }

    /// Answer a POST carrying `body`.
    fn post(&self, _ctx: &mut C, _body: &[u8]) -> HandlerResult {
        Err(HandlerError::MethodNotAllowed)
    }
}

/// Route table errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// Two resources registered under one path.
    #[error("duplicate route {0}")]
    DuplicateRoute(&'static str),
}

/// One row of the route table.
pub struct RouteEntry<C> {
    path: &'static str,
    resource: Box<dyn Resource<C>>,
}

impl<C> RouteEntry<C> {
    /// Registered path
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Methods the resource declares
    pub fn methods(&self) -> &'static [Method] {
        self.resource.methods()
    }
}

/// Exact-match path router.
pub struct Dispatcher<C> {
    routes: Vec<RouteEntry<C>>,
}

impl<C> Default for Dispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Dispatcher<C> {
    /// Empty table.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register `resource` at `path`. Paths are unique.
    pub fn add_route(
        &mut self,
        path: &'static str,
        resource: impl Resource<C> + 'static,
    ) -> Result<(), DispatchError> {
        if self.routes.iter().any(|route| route.path == path) {
            return Err(DispatchError::DuplicateRoute(path));
        }
        self.routes.push(RouteEntry {
            path,
            resource: Box::new(resource),
        });
        Ok(())
    }

    /// Registered routes, in registration order.
    pub fn routes(&self) -> &[RouteEntry<C>] {
        &self.routes
    }

    /// Run the handler for `request` to completion and encode its reply.
    pub fn dispatch(&self, ctx: &mut C, request: &Request) -> Response {
        let method = request.method;
        let path = request.path.as_str();

        let Some(route) = self.routes.iter().find(|route| route.path == path) else {
            warn!("{} {}: no such route", method.as_str(), path);
            return Reply::error(status::NOT_FOUND, "Not found").into_response();
        };
        if !route.resource.methods().contains(&method) {
            warn!("{} {}: method not allowed", method.as_str(), path);
            return Reply::from(HandlerError::MethodNotAllowed).into_response();
        }

        let result = match method {
            Method::Get => route.resource.get(ctx),
            Method::Post => route.resource.post(ctx, &request.body),
            Method::Put | Method::Delete => Err(HandlerError::MethodNotAllowed),
        };
        let reply = result.unwrap_or_else(|err| {
            warn!("{} {}: {}", method.as_str(), path, err.status());
            Reply::from(err)
        });
        debug!("{} {} -> {}", method.as_str(), path, reply.status());
        reply.into_response()
    }
}
