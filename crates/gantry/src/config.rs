//! Client configuration assembly.
//!
//! One invocation produces one [`ClientConfig`]: the host's base
//! configuration merged with the client-target settings, the resolved plugin
//! alias table, and the transform pipeline. Assembly is deterministic for a
//! given context. The host gets a single chance to adjust the result through
//! its config-extend hook before the config is dispatched to the bundler.

use crate::alias::{AliasTable, ModuleRef, resolve_plugin_aliases};
use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::hooks::{EXTEND_CONFIG, HostHooks};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Public path prefix the browser uses for bundle assets during development.
///
/// Requests under this prefix resolve to files in the build directory.
pub const PUBLIC_PREFIX: &str = "/_gantry";

/// Entry module the host generates into the build directory.
pub const CLIENT_ENTRY: &str = "client.js";

/// Compile-time flag marking server-runtime code paths.
pub const DEFINE_SERVER: &str = "process.server";

/// Compile-time flag marking client-runtime code paths.
pub const DEFINE_CLIENT: &str = "process.client";

/// Compile-time flag marking static-generation code paths.
pub const DEFINE_STATIC: &str = "process.static";

/// Which runtime a configuration is being assembled for.
///
/// Passed to the config-extend hook so hosts can tell targets apart without
/// string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMode {
    /// True when assembling the browser bundle.
    pub is_client: bool,
    /// True when assembling a server bundle.
    pub is_server: bool,
}

impl TargetMode {
    /// Mode descriptor for the browser-targeted bundle.
    pub fn client() -> Self {
        Self {
            is_client: true,
            is_server: false,
        }
    }
}

/// A value substituted for a define key at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefineValue {
    /// Boolean flag.
    Bool(bool),
    /// Identifier or expression substituted verbatim.
    Str(String),
}

/// One stage of the client transform pipeline.
///
/// Stages run in list order. The client target appends its fixed stages after
/// whatever the host configured in its base pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "kebab-case")]
pub enum PipelineStage {
    /// Rewrites source text occurrences, keyed by the text to replace.
    EnvRewrite {
        /// Replacement map applied to module source text.
        substitutions: FxHashMap<String, String>,
    },
    /// JSX to plain JavaScript transform.
    Jsx,
    /// Single-file component compiler, configured by the host.
    ComponentCompiler {
        /// Host-provided compiler options, passed through untouched.
        options: serde_json::Value,
    },
    /// Transpilation for legacy browser targets.
    LegacyTranspile,
}

impl PipelineStage {
    /// Stable stage name, matching the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::EnvRewrite { .. } => "env-rewrite",
            PipelineStage::Jsx => "jsx",
            PipelineStage::ComponentCompiler { .. } => "component-compiler",
            PipelineStage::LegacyTranspile => "legacy-transpile",
        }
    }
}

/// Output settings for the client bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the bundle is written to.
    pub dir: PathBuf,
    /// Subdirectory for emitted assets, relative to `dir`.
    pub assets_dir: String,
    /// The single entry module.
    pub input: PathBuf,
    /// Emit the asset manifest used to map entries to emitted files.
    pub manifest: bool,
    /// Emit the manifest consumed by server-side rendering.
    pub ssr_manifest: bool,
}

/// Dev server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerOptions {
    /// Expose a request-handler interface only, no independent listener.
    pub middleware_mode: bool,
}

/// Host base configuration shared by every bundle target.
///
/// All fields default to empty, a host with no opinions gets a working
/// client config from the target settings alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    /// Compile-time defines applied to every target.
    pub define: FxHashMap<String, DefineValue>,
    /// Aliases applied to every target. Plugin names shadow these.
    pub aliases: AliasTable,
    /// Pipeline stages that run ahead of the client stages.
    pub pipeline: Vec<PipelineStage>,
    /// Options forwarded to the component compiler stage.
    pub component_compiler: serde_json::Value,
}

/// The fully assembled configuration for the client target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Compile-time defines, base entries plus the client discriminators.
    pub define: FxHashMap<String, DefineValue>,
    /// Bundler cache directory, scoped per target.
    pub cache_dir: PathBuf,
    /// Merged alias table: base aliases, plugin aliases, dev asset alias.
    pub aliases: AliasTable,
    /// Output settings.
    pub output: OutputConfig,
    /// Transform pipeline in execution order.
    pub pipeline: Vec<PipelineStage>,
    /// Dev server settings.
    pub server: ServerOptions,
}

/// Assemble the client configuration for one invocation.
///
/// Validates the host directories, resolves the plugin alias table, merges
/// the base configuration with the client settings, then suspends on the
/// host's config-extend hook so it can adjust the result. The returned config
/// is what the bundler receives, including any hook mutations.
///
/// # Errors
///
/// Returns [`Error::Config`] if the context fails validation (the hook is
/// never invoked in that case) and [`Error::Hook`] if the config-extend hook
/// fails.
pub async fn assemble(ctx: &BuildContext, hooks: &dyn HostHooks) -> Result<ClientConfig> {
    ctx.validate()?;

    let stub = ctx.stub_module();
    let aliases = resolve_plugin_aliases(&ctx.plugins, &stub);
    let mut config = merge_client_config(ctx, aliases);

    tracing::debug!(
        "Assembled client config: {} aliases, {} pipeline stages",
        config.aliases.len(),
        config.pipeline.len()
    );

    hooks
        .extend_config(&mut config, TargetMode::client())
        .await
        .map_err(|source| Error::Hook {
            hook: EXTEND_CONFIG,
            source,
        })?;

    Ok(config)
}

/// Merge the host base configuration with the client-target settings.
fn merge_client_config(ctx: &BuildContext, plugin_aliases: AliasTable) -> ClientConfig {
    let base = &ctx.base;

    // Client discriminators override base entries of the same name.
    let mut define = base.define.clone();
    define.insert(DEFINE_SERVER.to_string(), DefineValue::Bool(false));
    define.insert(DEFINE_CLIENT.to_string(), DefineValue::Bool(true));
    define.insert(DEFINE_STATIC.to_string(), DefineValue::Bool(false));
    define.insert(
        "global".to_string(),
        DefineValue::Str("window".to_string()),
    );
    define.insert("module.hot".to_string(), DefineValue::Bool(false));

    // Plugin names shadow base aliases of the same name.
    let mut aliases = base.aliases.clone();
    aliases.extend(plugin_aliases);
    if ctx.dev {
        aliases.insert(
            PUBLIC_PREFIX.to_string(),
            ModuleRef::module(&ctx.build_dir),
        );
    }

    // Host stages run first, the client stages are appended in fixed order.
    let mut pipeline = base.pipeline.clone();
    pipeline.push(PipelineStage::EnvRewrite {
        substitutions: env_substitutions(),
    });
    pipeline.push(PipelineStage::Jsx);
    pipeline.push(PipelineStage::ComponentCompiler {
        options: base.component_compiler.clone(),
    });
    pipeline.push(PipelineStage::LegacyTranspile);

    ClientConfig {
        define,
        cache_dir: ctx
            .root_dir
            .join("node_modules")
            .join(".cache")
            .join("gantry")
            .join("client"),
        aliases,
        output: OutputConfig {
            dir: ctx.build_dir.join("dist").join("client"),
            assets_dir: ".".to_string(),
            input: ctx.build_dir.join(CLIENT_ENTRY),
            manifest: true,
            ssr_manifest: true,
        },
        pipeline,
        server: ServerOptions {
            middleware_mode: true,
        },
    }
}

/// Source-text rewrites every client bundle carries.
fn env_substitutions() -> FxHashMap<String, String> {
    let mut substitutions = FxHashMap::default();
    substitutions.insert("process.env".to_string(), "import.meta.env".to_string());
    substitutions
}
