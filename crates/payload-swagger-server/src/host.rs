//! A minimal host with an initialization lifecycle.
//!
//! The host owns the finalized collection configuration and, optionally, a
//! request router. Plugins register themselves by wrapping the init hook,
//! and mount sub-routers that are merged into the host router once
//! initialization is over.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use axum::Router;
use payload_swagger_core::{HostConfig, Result, SwaggerError};
use tracing::debug;

/// Callback run by [`Host::init`]. Shared so initialization can be repeated.
pub type InitHook = Arc<dyn Fn(&mut Host) + Send + Sync>;

/// The host application.
pub struct Host {
    config: HostConfig,
    router: Option<Router>,
    mounts: BTreeMap<String, Router>,
    on_init: Option<InitHook>,
}

impl Host {
    /// A host without a request router.
    #[must_use]
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            router: None,
            mounts: BTreeMap::new(),
            on_init: None,
        }
    }

    /// Attach the request router.
    #[must_use]
    pub fn with_router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// The finalized configuration.
    #[must_use]
    pub const fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Mutable access, for plugins that adjust the configuration.
    pub fn config_mut(&mut self) -> &mut HostConfig {
        &mut self.config
    }

    /// Whether a request router is present.
    #[must_use]
    pub const fn has_router(&self) -> bool {
        self.router.is_some()
    }

    /// Register `router` under `path`, replacing any earlier mount there.
    ///
    /// # Errors
    ///
    /// Returns [`SwaggerError::RouterUnavailable`] when the host has no router.
    pub fn mount(&mut self, path: impl Into<String>, router: Router) -> Result<()> {
        if self.router.is_none() {
            return Err(SwaggerError::RouterUnavailable);
        }
        let path = path.into();
        debug!(path = %path, "Mounting router");
        self.mounts.insert(path, router);
        Ok(())
    }

    /// Paths mounted so far, sorted.
    pub fn mounted_paths(&self) -> impl Iterator<Item = &str> {
        self.mounts.keys().map(String::as_str)
    }

    /// Replace the init hook.
    pub fn set_on_init(&mut self, hook: impl Fn(&mut Self) + Send + Sync + 'static) {
        self.on_init = Some(Arc::new(hook));
    }

    /// Remove and return the init hook, so a plugin can chain to it.
    pub fn take_on_init(&mut self) -> Option<InitHook> {
        self.on_init.take()
    }

    /// Run the init hook. Safe to call again after the configuration changes.
    pub fn init(&mut self) {
        if let Some(hook) = self.on_init.clone() {
            hook(self);
        }
    }

    /// The host router with every mount merged in; `None` without a router.
    #[must_use]
    pub fn into_router(self) -> Option<Router> {
        let mounts = self.mounts;
        self.router
            .map(|router| {
                mounts
                    .into_values()
                    .fold(router, |router, mount| router.merge(mount))
            })
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("collections", &self.config.collections.len())
            .field("has_router", &self.router.is_some())
            .field("mounts", &self.mounts.keys().collect::<Vec<_>>())
            .field("has_on_init", &self.on_init.is_some())
            .finish()
    }
}
