//! Shared test doubles for gantry integration tests.
//!
//! Provides a temp-dir backed project layout plus mock implementations of
//! the bundler, dev server, and host hook seams that record every call.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, Uri};
use gantry::{
    BoxError, BuildContext, Bundler, ClientConfig, CloseHook, DevMiddleware, DevServer, HostHooks,
    TargetMode,
};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Closure hosts use to mutate the config inside `extend_config`.
pub type ExtendFn = Box<dyn Fn(&mut ClientConfig) + Send + Sync>;

/// A real (temporary) project layout that passes context validation.
pub struct TestProject {
    pub root: TempDir,
    pub build_dir: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let root = TempDir::new().expect("temp project root");
        let build_dir = root.path().join(".build");
        std::fs::create_dir(&build_dir).expect("create build dir");
        Self { root, build_dir }
    }

    /// Production-mode context over this project.
    pub fn context(&self) -> BuildContext {
        BuildContext::new(self.root.path(), &self.build_dir)
    }
}

/// Bundler double recording every build and server creation.
pub struct MockBundler {
    pub build_calls: AtomicUsize,
    pub seen_configs: Mutex<Vec<ClientConfig>>,
    pub server: Arc<MockDevServer>,
    pub fail_build: bool,
    pub fail_server: bool,
}

impl MockBundler {
    pub fn new() -> Self {
        Self {
            build_calls: AtomicUsize::new(0),
            seen_configs: Mutex::new(Vec::new()),
            server: Arc::new(MockDevServer::new()),
            fail_build: false,
            fail_server: false,
        }
    }

    pub fn failing_build() -> Self {
        Self {
            fail_build: true,
            ..Self::new()
        }
    }

    pub fn failing_server() -> Self {
        Self {
            fail_server: true,
            ..Self::new()
        }
    }

    /// Configs this bundler received, in call order.
    pub fn seen_configs(&self) -> Vec<ClientConfig> {
        self.seen_configs.lock().clone()
    }
}

#[async_trait]
impl Bundler for MockBundler {
    async fn build(&self, config: ClientConfig) -> Result<(), BoxError> {
        self.build_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_build {
            return Err(anyhow::anyhow!("bundler rejected the build").into());
        }
        self.seen_configs.lock().push(config);
        Ok(())
    }

    async fn create_server(&self, config: ClientConfig) -> Result<Arc<dyn DevServer>, BoxError> {
        if self.fail_server {
            return Err("could not create dev pipeline".into());
        }
        self.seen_configs.lock().push(config);
        Ok(self.server.clone())
    }
}

/// Dev server double that rewrites the request URI and counts closes.
pub struct MockDevServer {
    pub handled: AtomicUsize,
    pub close_calls: AtomicUsize,
    pub respond: bool,
}

impl MockDevServer {
    pub fn new() -> Self {
        Self {
            handled: AtomicUsize::new(0),
            close_calls: AtomicUsize::new(0),
            respond: true,
        }
    }
}

#[async_trait]
impl DevServer for MockDevServer {
    async fn handle(&self, req: &mut Request<Body>) -> Result<Option<Response<Body>>, BoxError> {
        self.handled.fetch_add(1, Ordering::SeqCst);
        *req.uri_mut() = Uri::from_static("/@engine/rewritten");
        if self.respond {
            let response = Response::builder()
                .status(StatusCode::OK)
                .body(Body::empty())
                .expect("response");
            Ok(Some(response))
        } else {
            Ok(None)
        }
    }

    async fn close(&self) -> Result<(), BoxError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Host hooks double recording invocation order and captured handles.
pub struct RecordingHooks {
    pub calls: Mutex<Vec<&'static str>>,
    pub middleware: Mutex<Option<DevMiddleware>>,
    pub close_hook: Mutex<Option<CloseHook>>,
    pub seen_mode: Mutex<Option<TargetMode>>,
    pub extend: Option<ExtendFn>,
    pub fail_on: Option<&'static str>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            middleware: Mutex::new(None),
            close_hook: Mutex::new(None),
            seen_mode: Mutex::new(None),
            extend: None,
            fail_on: None,
        }
    }

    /// Hooks that fail when the named hook fires.
    pub fn failing_on(hook: &'static str) -> Self {
        Self {
            fail_on: Some(hook),
            ..Self::new()
        }
    }

    /// Hooks that apply a mutation inside `extend_config`.
    pub fn with_extend(extend: impl Fn(&mut ClientConfig) + Send + Sync + 'static) -> Self {
        Self {
            extend: Some(Box::new(extend)),
            ..Self::new()
        }
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    pub fn take_middleware(&self) -> Option<DevMiddleware> {
        self.middleware.lock().take()
    }

    pub fn take_close_hook(&self) -> Option<CloseHook> {
        self.close_hook.lock().take()
    }
}

#[async_trait]
impl HostHooks for RecordingHooks {
    async fn extend_config(
        &self,
        config: &mut ClientConfig,
        mode: TargetMode,
    ) -> Result<(), BoxError> {
        self.calls.lock().push("extend_config");
        *self.seen_mode.lock() = Some(mode);
        if self.fail_on == Some("extend_config") {
            return Err("host rejected the config".into());
        }
        if let Some(extend) = &self.extend {
            extend(config);
        }
        Ok(())
    }

    async fn server_created(&self, _server: Arc<dyn DevServer>) -> Result<(), BoxError> {
        self.calls.lock().push("server_created");
        if self.fail_on == Some("server_created") {
            return Err("host could not record the server".into());
        }
        Ok(())
    }

    async fn register_dev_middleware(&self, middleware: DevMiddleware) -> Result<(), BoxError> {
        self.calls.lock().push("register_dev_middleware");
        if self.fail_on == Some("register_dev_middleware") {
            return Err("host request chain is sealed".into());
        }
        *self.middleware.lock() = Some(middleware);
        Ok(())
    }

    fn on_close(&self, hook: CloseHook) {
        self.calls.lock().push("on_close");
        *self.close_hook.lock() = Some(hook);
    }
}
