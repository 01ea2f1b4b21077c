//! Config assembly through the public API, including hook interplay.

mod helpers;

use gantry::{
    BuildDriver, DEFINE_CLIENT, DefineValue, Error, PUBLIC_PREFIX, PipelineStage,
    PluginDescriptor, assemble,
};
use helpers::{MockBundler, RecordingHooks, TestProject};
use std::sync::Arc;

#[tokio::test]
async fn hook_receives_the_client_mode() {
    let project = TestProject::new();
    let hooks = RecordingHooks::new();

    assemble(&project.context(), &hooks).await.expect("assemble");

    let mode = hooks.seen_mode.lock().take().expect("mode recorded");
    assert!(mode.is_client);
    assert!(!mode.is_server);
}

#[tokio::test]
async fn hook_mutations_survive_into_the_result() {
    let project = TestProject::new();
    let hooks = RecordingHooks::with_extend(|config| {
        config.define.insert(
            "app.flags.beta".to_string(),
            DefineValue::Bool(true),
        );
        config.pipeline.push(PipelineStage::Jsx);
    });

    let config = assemble(&project.context(), &hooks).await.expect("assemble");

    assert_eq!(
        config.define.get("app.flags.beta"),
        Some(&DefineValue::Bool(true))
    );
    assert_eq!(
        config.pipeline.last().map(PipelineStage::name),
        Some("jsx")
    );
}

#[tokio::test]
async fn hook_mutations_reach_the_bundler() {
    let project = TestProject::new();
    let bundler = Arc::new(MockBundler::new());
    let hooks = Arc::new(RecordingHooks::with_extend(|config| {
        config
            .define
            .insert("app.release".to_string(), DefineValue::Str("1.4.0".to_string()));
    }));

    BuildDriver::new(bundler.clone(), hooks)
        .build_client(&project.context())
        .await
        .expect("production build");

    let configs = bundler.seen_configs();
    assert_eq!(
        configs[0].define.get("app.release"),
        Some(&DefineValue::Str("1.4.0".to_string()))
    );
}

#[tokio::test]
async fn assembly_is_deterministic_for_a_context() {
    let project = TestProject::new();
    let ctx = project
        .context()
        .dev(true)
        .plugin(PluginDescriptor::client("analytics", "/p/analytics.js"))
        .plugin(PluginDescriptor::server("db", "/p/db.js"));

    let first = assemble(&ctx, &RecordingHooks::new()).await.expect("first");
    let second = assemble(&ctx, &RecordingHooks::new()).await.expect("second");

    assert_eq!(first, second);
}

#[tokio::test]
async fn plugin_and_asset_aliases_assemble_in_dev() {
    let project = TestProject::new();
    let ctx = project
        .context()
        .dev(true)
        .plugin(PluginDescriptor::client("analytics", "/p/analytics.js"))
        .plugin(PluginDescriptor::server("db", "/p/db.js"));

    let config = assemble(&ctx, &RecordingHooks::new()).await.expect("assemble");

    let analytics = config.aliases.get("analytics").expect("client alias");
    assert_eq!(analytics.path, std::path::Path::new("/p/analytics.js"));

    let db = config.aliases.get("db").expect("server alias");
    assert_eq!(db.path, project.build_dir.join("empty.js"));

    let assets = config.aliases.get(PUBLIC_PREFIX).expect("asset alias");
    assert_eq!(assets.path, project.build_dir);
}

#[tokio::test]
async fn asset_alias_is_absent_in_production() {
    let project = TestProject::new();
    let config = assemble(&project.context(), &RecordingHooks::new())
        .await
        .expect("assemble");

    assert!(!config.aliases.contains_key(PUBLIC_PREFIX));
    assert_eq!(
        config.define.get(DEFINE_CLIENT),
        Some(&DefineValue::Bool(true))
    );
}

#[tokio::test]
async fn client_stages_close_the_pipeline() {
    let project = TestProject::new();
    let config = assemble(&project.context(), &RecordingHooks::new())
        .await
        .expect("assemble");

    let names: Vec<_> = config.pipeline.iter().map(PipelineStage::name).collect();
    assert_eq!(
        names,
        ["env-rewrite", "jsx", "component-compiler", "legacy-transpile"]
    );
}

#[tokio::test]
async fn validation_failure_aborts_before_the_hook() {
    let project = TestProject::new();
    let hooks = RecordingHooks::new();
    let ctx = gantry::BuildContext::new(project.root.path(), project.build_dir.join("missing"));

    let err = assemble(&ctx, &hooks).await.expect_err("validation fails");

    assert!(matches!(err, Error::Config(_)));
    assert!(hooks.call_names().is_empty());
}

#[tokio::test]
async fn hook_failure_carries_the_hook_name() {
    let project = TestProject::new();
    let hooks = RecordingHooks::failing_on("extend_config");

    let err = assemble(&project.context(), &hooks)
        .await
        .expect_err("hook fails");

    assert!(matches!(err, Error::Hook { hook: "extend_config", .. }));
}
