#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the disaster map server.
//!
//! Endpoints come from the embedded configuration, the file named by
//! `DISASTER_MAP_CONFIG` if set, and the `DISASTER_MAP_*_URL` overrides.
//! The listen address comes from `BIND_ADDR` and `PORT`.

use std::path::PathBuf;

use disaster_map_source::EndpointConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var_os("DISASTER_MAP_CONFIG").map(PathBuf::from);
    let endpoints = EndpointConfig::load(config_path.as_deref()).map_err(std::io::Error::other)?;

    disaster_map_server::run_server(endpoints, disaster_map_server::BindConfig::from_env()).await
}
