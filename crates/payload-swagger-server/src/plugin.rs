//! The Swagger plugin: generate on init, then mount the explorer.

use payload_swagger_core::{GeneratorOptions, SwaggerGenerator, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api;
use crate::host::Host;

/// Mount point of the explorer when none is configured.
pub const DEFAULT_SWAGGER_PATH: &str = "/api/swagger";

/// Environment variable holding the `info.version` override.
pub const VERSION_ENV: &str = "VERSION";

/// Plugin options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwaggerPluginOptions {
    /// Allow-list of collection slugs; empty documents every collection.
    pub collections: Vec<String>,

    /// Where the explorer is served. The document itself is at `{path}.json`.
    pub path: String,

    /// Locale used for labels and descriptions.
    pub locale: String,
}

impl Default for SwaggerPluginOptions {
    fn default() -> Self {
        Self {
            collections: Vec::new(),
            path: DEFAULT_SWAGGER_PATH.to_owned(),
            locale: DEFAULT_LOCALE.to_owned(),
        }
    }
}

impl SwaggerPluginOptions {
    /// Generator options for these plugin options and an optional version.
    #[must_use]
    pub fn generator_options(&self, version: Option<String>) -> GeneratorOptions {
        GeneratorOptions {
            collections: self.collections.clone(),
            locale: self.locale.clone(),
            version,
        }
    }
}

/// Registers document generation and serving on a [`Host`].
#[derive(Debug, Clone, Default)]
pub struct SwaggerPlugin {
    options: SwaggerPluginOptions,
}

impl SwaggerPlugin {
    /// Create the plugin.
    #[must_use]
    pub const fn new(options: SwaggerPluginOptions) -> Self {
        Self { options }
    }

    /// The plugin options.
    #[must_use]
    pub const fn options(&self) -> &SwaggerPluginOptions {
        &self.options
    }

    /// Wrap the host's init hook.
    ///
    /// The new hook installs the explorer, then runs whatever hook was
    /// registered before, whether or not the explorer could be mounted.
    #[must_use]
    pub fn apply(self, mut host: Host) -> Host {
        let previous = host.take_on_init();
        let options = self.options;

        host.set_on_init(move |host| {
            install(host, &options);
            if let Some(previous) = &previous {
                previous(host);
            }
        });
        host
    }
}

/// The `info.version` override from the environment. Unset and empty
/// values both leave the default in place.
#[must_use]
pub fn version_from_env() -> Option<String> {
    std::env::var(VERSION_ENV).ok().filter(|v| !v.is_empty())
}

/// Generate the document from the host's current configuration and mount
/// the explorer. A host without a router, or a path that cannot be routed,
/// gets a warning, not an error.
pub fn install(host: &mut Host, options: &SwaggerPluginOptions) {
    if !host.has_router() {
        warn!(path = %options.path, "Skipping Swagger UI, host has no request router");
        return;
    }
    let Some(path) = api::normalize_mount_path(&options.path) else {
        warn!(path = %options.path, "Skipping Swagger UI, mount path cannot be routed");
        return;
    };

    let generator_options = options.generator_options(version_from_env());
    let document = SwaggerGenerator::generate(host.config(), &generator_options);
    let Some(router) = api::swagger_router(&path, document) else {
        return;
    };

    match host.mount(path.clone(), router) {
        Ok(()) => info!(
            path = %path,
            document = %api::swagger_json_path(&path),
            "Swagger UI mounted"
        ),
        Err(e) => warn!(error = %e, path = %path, "Skipping Swagger UI"),
    }
}
