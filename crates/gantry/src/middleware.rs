//! Dev server middleware.
//!
//! Wraps the dev server's handler for mounting into the host's request
//! chain. The embedded server rewrites request URIs in place during its
//! internal routing and does not always put them back when it declines a
//! request, which breaks every handler running after it. The wrapper
//! snapshots the URI before delegating and restores it afterwards, so the
//! rest of the chain always observes the original request line.

use crate::bundler::DevServer;
use crate::error::BoxError;
use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::Arc;

/// Host-facing handle around the dev server's request handler.
///
/// Cheap to clone, clones share the underlying server.
#[derive(Clone)]
pub struct DevMiddleware {
    server: Arc<dyn DevServer>,
}

impl DevMiddleware {
    /// Wrap a dev server for mounting into a request chain.
    pub fn new(server: Arc<dyn DevServer>) -> Self {
        Self { server }
    }

    /// Offer a request to the dev server, preserving the request URI.
    ///
    /// The outcome is the server's own: `Ok(Some(response))` when it handled
    /// the request, `Ok(None)` when the host should fall through to its next
    /// handler. Whatever the server did to the URI, the request carries its
    /// original URI again when this returns, including on the error path.
    pub async fn handle(
        &self,
        req: &mut Request<Body>,
    ) -> Result<Option<Response<Body>>, BoxError> {
        let original_uri = req.uri().clone();
        let outcome = self.server.handle(req).await;
        *req.uri_mut() = original_uri;
        outcome
    }
}

impl std::fmt::Debug for DevMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevMiddleware").finish_non_exhaustive()
    }
}
