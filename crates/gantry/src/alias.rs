//! Plugin alias resolution.
//!
//! Client bundles import plugins by name. This module maps each registered
//! plugin name onto the module the bundler should actually load: the plugin's
//! own source when it targets the client, or the shared stub when it is
//! server-only. Carrying the export choice as data replaces the older trick
//! of smuggling it through a path prefix.

use crate::context::{PluginDescriptor, PluginMode, StubModule};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which binding an alias takes from its target module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportSelector {
    /// The module's default export.
    Default,
    /// The module as a whole (namespace or raw path passthrough).
    Module,
}

/// An alias target: a module path plus the export to take from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRef {
    /// Path to the module on disk.
    pub path: PathBuf,
    /// Export taken from the module.
    pub export: ExportSelector,
}

impl ModuleRef {
    /// Reference a module's default export.
    pub fn default_export(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            export: ExportSelector::Default,
        }
    }

    /// Reference a module as a whole.
    pub fn module(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            export: ExportSelector::Module,
        }
    }
}

/// Alias table handed to the bundler: import name to module reference.
pub type AliasTable = FxHashMap<String, ModuleRef>;

/// Resolve registered plugins into the client alias table.
///
/// Every plugin name resolves to a default export. Client plugins point at
/// their own source, server plugins point at the stub so the browser bundle
/// stays free of server code. Duplicate names follow registration order, the
/// later entry wins.
pub fn resolve_plugin_aliases(plugins: &[PluginDescriptor], stub: &StubModule) -> AliasTable {
    let mut table = AliasTable::default();
    for plugin in plugins {
        let target = match plugin.mode {
            PluginMode::Client => ModuleRef::default_export(&plugin.src),
            PluginMode::Server => ModuleRef::default_export(stub.path()),
        };
        table.insert(plugin.name.clone(), target);
    }
    table
}
