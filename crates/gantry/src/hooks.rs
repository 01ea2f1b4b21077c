//! Host extension points.
//!
//! The driver calls back into the host at fixed points of an invocation:
//! once to let it adjust the assembled config, and during dev setup to hand
//! over the server, the middleware, and the shutdown hook. Hooks are plain
//! trait methods, so each extension point is typed and the compiler keeps
//! host implementations in sync with the driver.
//!
//! Hook ordering during a dev invocation is fixed: `extend_config`, then
//! `server_created`, then `register_dev_middleware`, then `on_close`.

use crate::bundler::DevServer;
use crate::config::{ClientConfig, TargetMode};
use crate::error::BoxError;
use crate::middleware::DevMiddleware;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by a registered close hook.
pub type CloseFuture = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send>>;

/// Deferred shutdown action registered with the host.
///
/// The host invokes it at most once, when tearing the dev server down.
pub type CloseHook = Box<dyn FnOnce() -> CloseFuture + Send>;

pub(crate) const EXTEND_CONFIG: &str = "extend_config";
pub(crate) const SERVER_CREATED: &str = "server_created";
pub(crate) const REGISTER_DEV_MIDDLEWARE: &str = "register_dev_middleware";

/// Callbacks a host provides to participate in an invocation.
///
/// A failing hook aborts the invocation with [`Error::Hook`] naming the hook
/// that failed.
///
/// [`Error::Hook`]: crate::error::Error::Hook
#[async_trait]
pub trait HostHooks: Send + Sync {
    /// Adjust the assembled configuration before it reaches the bundler.
    ///
    /// Runs exactly once per invocation, after merging and before either the
    /// production build or dev server creation. Mutations made here are what
    /// the bundler sees.
    async fn extend_config(
        &self,
        config: &mut ClientConfig,
        mode: TargetMode,
    ) -> Result<(), BoxError>;

    /// Observe the dev server right after creation.
    ///
    /// Dev invocations only. Runs before the middleware is registered.
    async fn server_created(&self, server: Arc<dyn DevServer>) -> Result<(), BoxError>;

    /// Receive the middleware to mount into the host's request chain.
    ///
    /// Dev invocations only.
    async fn register_dev_middleware(&self, middleware: DevMiddleware) -> Result<(), BoxError>;

    /// Record an action to run when the host shuts down.
    ///
    /// Dev invocations register exactly one hook here, it closes the dev
    /// server.
    fn on_close(&self, hook: CloseHook);
}
