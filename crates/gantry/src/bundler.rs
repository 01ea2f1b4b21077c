//! Bundler abstraction.
//!
//! The orchestration layer never talks to a concrete bundling engine. Hosts
//! implement [`Bundler`] (and [`DevServer`] for development) around whatever
//! engine they embed, and the driver stays engine-agnostic.
//!
//! # Example
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use gantry::{Bundler, BoxError, ClientConfig, DevServer};
//! use std::sync::Arc;
//!
//! struct EngineBundler;
//!
//! #[async_trait]
//! impl Bundler for EngineBundler {
//!     async fn build(&self, config: ClientConfig) -> Result<(), BoxError> {
//!         // Hand the config to the engine and wait for the bundle.
//!         Ok(())
//!     }
//!
//!     async fn create_server(&self, config: ClientConfig) -> Result<Arc<dyn DevServer>, BoxError> {
//!         // Bring up the engine's dev pipeline in middleware mode.
//!         todo!()
//!     }
//! }
//! ```

use crate::config::ClientConfig;
use crate::error::BoxError;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::Arc;

/// An embedded bundling engine.
///
/// Both operations consume the assembled config: each invocation assembles a
/// fresh one, so engines are free to move it into their own option types.
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Run a production build to completion.
    async fn build(&self, config: ClientConfig) -> Result<(), BoxError>;

    /// Create the engine's development server without starting a listener.
    async fn create_server(&self, config: ClientConfig) -> Result<Arc<dyn DevServer>, BoxError>;
}

/// A running development server exposed as a request handler.
///
/// The server owns no network listener. The host mounts it into its own
/// middleware chain (through [`DevMiddleware`]) and forwards requests here.
///
/// [`DevMiddleware`]: crate::middleware::DevMiddleware
#[async_trait]
pub trait DevServer: Send + Sync {
    /// Offer a request to the dev server.
    ///
    /// Returns `Ok(Some(response))` when the server produced a response and
    /// `Ok(None)` when it declined, in which case the host continues with its
    /// own handlers. The server may rewrite the request in place (including
    /// its URI) while deciding.
    async fn handle(&self, req: &mut Request<Body>) -> Result<Option<Response<Body>>, BoxError>;

    /// Shut the server down and release its resources.
    async fn close(&self) -> Result<(), BoxError>;
}
