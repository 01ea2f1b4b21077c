#![cfg_attr(docsrs, feature(doc_cfg))]

//! # gantry
//!
//! Client-bundle orchestration: embeds a JavaScript bundler's production
//! build and development server into a host server process.
//!
//! Gantry owns the glue between a host framework and its bundling engine.
//! Given the host's [`BuildContext`] it assembles the client-target
//! configuration (plugin aliases, compile-time defines, transform pipeline,
//! output layout), lets the host adjust it through a typed hook, and then
//! either runs a production build or wires the engine's dev server into the
//! host's own request chain. The engine itself stays behind the [`Bundler`]
//! and [`DevServer`] traits.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gantry::{BuildContext, BuildDriver, PluginDescriptor};
//! use std::sync::Arc;
//!
//! # async fn run(
//! #     bundler: Arc<dyn gantry::Bundler>,
//! #     hooks: Arc<dyn gantry::HostHooks>,
//! # ) -> gantry::Result<()> {
//! let ctx = BuildContext::new("/srv/app", "/srv/app/.build")
//!     .dev(false)
//!     .plugin(PluginDescriptor::client("analytics", "/srv/app/plugins/analytics.js"))
//!     .plugin(PluginDescriptor::server("db", "/srv/app/plugins/db.js"));
//!
//! BuildDriver::new(bundler, hooks).build_client(&ctx).await?;
//! # Ok(()) }
//! ```
//!
//! In dev mode (`.dev(true)`) the same call creates the engine's server
//! instead, announces it through [`HostHooks::server_created`], hands the
//! host a [`DevMiddleware`] to mount, and registers a close hook that shuts
//! the server down.
//!
//! ## Suspension model
//!
//! Every await in an invocation is sequential: bundler calls and host hooks
//! run one after another on the caller's task. Gantry spawns no tasks and
//! applies no timeouts, so a stalled bundler or hook suspends the invocation
//! until the host gives up on the future.

// Orchestration modules
pub mod alias;
pub mod bundler;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod hooks;
pub mod middleware;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::LogLevel;

// Re-export the public surface at the crate root
pub use alias::{AliasTable, ExportSelector, ModuleRef, resolve_plugin_aliases};
pub use bundler::{Bundler, DevServer};
pub use config::{
    BaseConfig, CLIENT_ENTRY, ClientConfig, DEFINE_CLIENT, DEFINE_SERVER, DEFINE_STATIC,
    DefineValue, OutputConfig, PUBLIC_PREFIX, PipelineStage, ServerOptions, TargetMode, assemble,
};
pub use context::{BuildContext, PluginDescriptor, PluginMode, StubModule};
pub use driver::BuildDriver;
pub use error::{BoxError, ConfigError, Error, Result};
pub use hooks::{CloseFuture, CloseHook, HostHooks};
pub use middleware::DevMiddleware;
