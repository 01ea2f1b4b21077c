//! Host build context.
//!
//! The context is the host's description of one build invocation: where the
//! project lives, where generated sources land, which plugins are registered,
//! and the base configuration shared by every bundle target. Drivers treat it
//! as read-only input.

use crate::config::BaseConfig;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which runtime a registered plugin belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginMode {
    /// Runs in the browser bundle.
    Client,
    /// Runs on the server only and must never reach the browser bundle.
    Server,
}

/// A plugin registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Import name the bundle refers to the plugin by.
    pub name: String,
    /// Runtime the plugin targets.
    pub mode: PluginMode,
    /// Path to the plugin's source module.
    pub src: PathBuf,
}

impl PluginDescriptor {
    /// Create a descriptor for a client-runtime plugin.
    pub fn client(name: impl Into<String>, src: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            mode: PluginMode::Client,
            src: src.into(),
        }
    }

    /// Create a descriptor for a server-only plugin.
    pub fn server(name: impl Into<String>, src: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            mode: PluginMode::Server,
            src: src.into(),
        }
    }
}

/// The no-op module substituted for server-only plugins in client bundles.
///
/// The host generates this file into the build directory alongside the other
/// generated sources. Gantry only computes where it lives, it never writes
/// the file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubModule {
    path: PathBuf,
}

impl StubModule {
    /// File name of the stub inside the build directory.
    pub const FILE_NAME: &'static str = "empty.js";

    /// Locate the stub for a given build directory.
    pub fn new(build_dir: &Path) -> Self {
        Self {
            path: build_dir.join(Self::FILE_NAME),
        }
    }

    /// Absolute path of the stub module.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One build invocation's worth of host state.
///
/// Construct with [`BuildContext::new`] and chain the remaining settings:
///
/// ```
/// use gantry::{BuildContext, PluginDescriptor};
///
/// let ctx = BuildContext::new("/srv/app", "/srv/app/.build")
///     .dev(true)
///     .plugin(PluginDescriptor::client("analytics", "/srv/app/plugins/analytics.js"));
/// assert!(ctx.dev);
/// ```
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Whether this invocation serves development traffic instead of
    /// producing a production bundle.
    pub dev: bool,
    /// Project root directory.
    pub root_dir: PathBuf,
    /// Directory holding host-generated sources (entry module, stub).
    pub build_dir: PathBuf,
    /// Plugins registered with the host, in registration order.
    pub plugins: Vec<PluginDescriptor>,
    /// Base configuration shared by every bundle target.
    pub base: BaseConfig,
}

impl BuildContext {
    /// Create a context for the given project root and build directory.
    ///
    /// Defaults to production mode with no plugins and an empty base
    /// configuration.
    pub fn new(root_dir: impl Into<PathBuf>, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            dev: false,
            root_dir: root_dir.into(),
            build_dir: build_dir.into(),
            plugins: Vec::new(),
            base: BaseConfig::default(),
        }
    }

    /// Set development mode.
    pub fn dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    /// Register one plugin.
    pub fn plugin(mut self, plugin: PluginDescriptor) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Register several plugins at once, keeping their order.
    pub fn plugins(mut self, plugins: impl IntoIterator<Item = PluginDescriptor>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    /// Set the base configuration shared by every target.
    pub fn base(mut self, base: BaseConfig) -> Self {
        self.base = base;
        self
    }

    /// Stub module substituted for server-only plugins, fixed per context.
    pub fn stub_module(&self) -> StubModule {
        StubModule::new(&self.build_dir)
    }

    /// Validate the host directories.
    ///
    /// # Errors
    ///
    /// Returns an error if either directory is relative, missing, or not a
    /// directory. Validation runs before any configuration is assembled, so
    /// a failing context produces no partial state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dir("root_dir", &self.root_dir)?;
        validate_dir("build_dir", &self.build_dir)?;
        Ok(())
    }
}

fn validate_dir(field: &'static str, path: &Path) -> Result<(), ConfigError> {
    if !path.is_absolute() {
        return Err(ConfigError::PathNotAbsolute {
            field,
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ConfigError::DirNotFound {
            field,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
