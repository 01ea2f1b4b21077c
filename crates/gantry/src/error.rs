//! Error types for client-bundle orchestration.
//!
//! This module provides a hierarchical error type system using `thiserror` for
//! structured error handling. Each variant records which phase of an
//! invocation failed, so hosts can tell a rejected configuration apart from a
//! bundler failure or a misbehaving hook.
//!
//! # Architecture
//!
//! - **`Error`** is the top-level type returned by driver and assembly entry
//!   points. Collaborator failures are carried as boxed sources.
//! - **`ConfigError`** covers host-context validation and converts into
//!   `Error` automatically via `#[from]`.
//! - **`BoxError`** is the error currency at the collaborator seams: bundlers,
//!   dev servers, and host hooks all report failures as boxed errors.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error type carried across the bundler and hook seams.
///
/// Collaborators are implemented outside this crate, so their failures arrive
/// type-erased. The box keeps the original error available as a source chain.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error type for build and dev-server orchestration.
#[derive(Debug, Error)]
pub enum Error {
    /// Host context validation errors (bad directories, relative paths, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The bundler rejected or aborted a production build.
    #[error("Client build failed: {0}")]
    Build(#[source] BoxError),

    /// The bundler could not create its development server.
    #[error("Failed to start dev server: {0}")]
    DevServerStart(#[source] BoxError),

    /// A host hook reported a failure.
    #[error("Hook '{hook}' failed: {source}")]
    Hook {
        /// Name of the hook that failed.
        hook: &'static str,
        /// The failure reported by the host's hook implementation.
        #[source]
        source: BoxError,
    },
}

/// Host-context validation errors.
///
/// These occur before any bundler work starts. An invocation that fails
/// validation never reaches the config-extend hook.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A directory setting holds a relative path.
    #[error("{field} must be an absolute path, got: {}\n\nHint: Resolve host paths against the project root before invoking the build", .path.display())]
    PathNotAbsolute {
        /// Name of the offending context field.
        field: &'static str,
        /// The rejected path.
        path: PathBuf,
    },

    /// A directory setting points at a missing or non-directory location.
    #[error("{field} is not an existing directory: {}\n\nHint: The host must create its root and build directories before invoking the build", .path.display())]
    DirNotFound {
        /// Name of the offending context field.
        field: &'static str,
        /// The rejected path.
        path: PathBuf,
    },
}

/// Result type alias using `Error` as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::Build(_) => "BUILD_ERROR",
            Error::DevServerStart(_) => "DEV_SERVER_START_ERROR",
            Error::Hook { .. } => "HOOK_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Config(err) => Some(Box::new(format!(
                "Check the root and build directory settings on the build context.\nError: {}",
                err
            ))),
            Error::DevServerStart(err) => Some(Box::new(format!(
                "The bundler could not bring up its dev pipeline.\nError: {}",
                err
            ))),
            Error::Hook { hook, .. } => Some(Box::new(format!(
                "The host's '{}' hook returned an error. Fix the hook implementation or the data it receives.",
                hook
            ))),
            _ => None,
        }
    }
}
