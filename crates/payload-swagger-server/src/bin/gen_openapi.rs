//! Writes the generated OpenAPI document to a JSON file.
//!
//! Run with: cargo run --bin gen-openapi -p payload-swagger-server -- <host-config> [output]
//!
//! `output` defaults to `openapi.json` in the working directory. The
//! `VERSION` environment variable overrides `info.version`.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use payload_swagger_core::{HostConfig, DEFAULT_LOCALE};
use payload_swagger_server::plugin::version_from_env;
use payload_swagger_server::{api, SwaggerPluginOptions};

#[derive(Debug, Parser)]
#[command(name = "gen-openapi")]
#[command(about = "Write the OpenAPI document of a Payload configuration to a file", long_about = None)]
struct Args {
    /// Host configuration file (.json or .toml)
    #[arg(value_name = "HOST_CONFIG")]
    config: PathBuf,

    /// Where to write the document
    #[arg(value_name = "OUTPUT", default_value = "openapi.json")]
    output: PathBuf,

    /// Only document these collection slugs
    #[arg(long, value_delimiter = ',')]
    collections: Vec<String>,

    /// Locale for labels and descriptions
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,
}

impl Args {
    fn plugin_options(&self) -> SwaggerPluginOptions {
        SwaggerPluginOptions {
            collections: self.collections.clone(),
            locale: self.locale.clone(),
            ..SwaggerPluginOptions::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("Generating OpenAPI document from {}...\n", args.config.display());

    let config = HostConfig::load(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    config.validate()?;

    let options = args.plugin_options().generator_options(version_from_env());
    let json = api::get_openapi_json(&config, &options)?;

    fs::write(&args.output, &json)
        .with_context(|| format!("Failed to write to {}", args.output.display()))?;

    println!("Written to: {}", args.output.display());

    let document: serde_json::Value = serde_json::from_str(&json)?;
    if let Some(paths) = document.get("paths").and_then(|p| p.as_object()) {
        println!("Paths: {}", paths.len());
    }
    if let Some(schemas) = document
        .pointer("/components/schemas")
        .and_then(|s| s.as_object())
    {
        println!("Schemas: {}", schemas.len());
    }

    println!("\nOpenAPI document generated successfully!");
    Ok(())
}
