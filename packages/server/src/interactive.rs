//! Interactive mode for the server.
//!
//! Prompts for the bind address, port and endpoints before starting the
//! server.

use dialoguer::{Confirm, Input};
use disaster_map_source::EndpointConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks for a bind address and port (defaulting to `BIND_ADDR` and
/// `PORT`), lets the user adjust the feed endpoints, and delegates to
/// [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(endpoints: EndpointConfig) -> std::io::Result<()> {
    println!("Disaster Map Server");
    println!();

    let defaults = super::BindConfig::from_env();

    let addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let read_url: String = Input::new()
        .with_prompt("Incident feed URL")
        .default(endpoints.read_url.clone())
        .interact_text()
        .unwrap_or_else(|_| endpoints.read_url.clone());

    let write_url: String = Input::new()
        .with_prompt("Ingestion endpoint URL")
        .default(endpoints.write_url.clone())
        .interact_text()
        .unwrap_or_else(|_| endpoints.write_url.clone());

    if !Confirm::new()
        .with_prompt(format!("Start server on {addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(
        EndpointConfig {
            read_url,
            write_url,
            ..endpoints
        },
        super::BindConfig { addr, port },
    )
    .await
}
