//! Build driver.
//!
//! Entry point of an invocation. The driver assembles the client config,
//! then dispatches on the context's mode: production runs one build to
//! completion, development creates the bundler's server and wires it into
//! the host through the hook sequence.

use crate::bundler::Bundler;
use crate::config::{ClientConfig, assemble};
use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::hooks::{CloseFuture, HostHooks, REGISTER_DEV_MIDDLEWARE, SERVER_CREATED};
use crate::middleware::DevMiddleware;
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates client builds against a bundler on behalf of a host.
///
/// The driver holds no per-invocation state, one instance can serve any
/// number of sequential invocations.
pub struct BuildDriver {
    bundler: Arc<dyn Bundler>,
    hooks: Arc<dyn HostHooks>,
}

impl BuildDriver {
    /// Create a driver over a bundler and the host's hooks.
    pub fn new(bundler: Arc<dyn Bundler>, hooks: Arc<dyn HostHooks>) -> Self {
        Self { bundler, hooks }
    }

    /// Run one client invocation for the given context.
    ///
    /// Assembles the configuration (including the config-extend hook), then
    /// either runs the production build or sets up the dev server, depending
    /// on `ctx.dev`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid context, [`Error::Build`] or
    /// [`Error::DevServerStart`] for bundler failures, and [`Error::Hook`]
    /// when a host hook fails. A failed invocation performs no recovery, the
    /// host decides whether to retry.
    pub async fn build_client(&self, ctx: &BuildContext) -> Result<()> {
        let config = assemble(ctx, self.hooks.as_ref()).await?;

        if ctx.dev {
            self.start_dev_server(config).await
        } else {
            self.run_production_build(config).await.map(|_| ())
        }
    }

    /// Run the production build, returning the elapsed milliseconds.
    async fn run_production_build(&self, config: ClientConfig) -> Result<u64> {
        tracing::info!("Building client...");
        let start = Instant::now();

        self.bundler.build(config).await.map_err(Error::Build)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!("Client built in {}ms", duration_ms);
        Ok(duration_ms)
    }

    /// Create the dev server and hand it to the host.
    ///
    /// Hook order is fixed: `server_created`, then `register_dev_middleware`,
    /// then the close hook. The close hook owns the only shutdown path for
    /// the server, and being consumed on use it cannot close twice.
    async fn start_dev_server(&self, config: ClientConfig) -> Result<()> {
        let server = self
            .bundler
            .create_server(config)
            .await
            .map_err(Error::DevServerStart)?;

        self.hooks
            .server_created(Arc::clone(&server))
            .await
            .map_err(|source| Error::Hook {
                hook: SERVER_CREATED,
                source,
            })?;

        let middleware = DevMiddleware::new(Arc::clone(&server));
        self.hooks
            .register_dev_middleware(middleware)
            .await
            .map_err(|source| Error::Hook {
                hook: REGISTER_DEV_MIDDLEWARE,
                source,
            })?;

        self.hooks.on_close(Box::new(move || -> CloseFuture {
            Box::pin(async move { server.close().await })
        }));

        tracing::debug!("Dev server wired into the host request chain");
        Ok(())
    }
}

impl std::fmt::Debug for BuildDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildDriver").finish_non_exhaustive()
    }
}
