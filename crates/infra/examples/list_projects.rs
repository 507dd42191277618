//! List projects using configuration from the environment or a config file.
//!
//! ```text
//! CAMPLINE_ACCESS_TOKEN=... cargo run -p campline-infra --example list_projects
//! ```
//!
//! Without `CAMPLINE_ACCESS_TOKEN` the example prints the authorization URL
//! to visit first. With `CAMPLINE_AUTH_CODE` it exchanges the code instead.

#![allow(clippy::print_stdout)]

use campline_core::auth::generate_state;
use campline_domain::{ApiError, Credential};
use campline_infra::{config, init_tracing, CamplineClient, LogFormat};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(None, LogFormat::Pretty);

    let client = CamplineClient::from_config(config::load()?)?;

    let client = match (std::env::var("CAMPLINE_ACCESS_TOKEN"), std::env::var("CAMPLINE_AUTH_CODE")) {
        (Ok(token), _) => client.with_credential(Credential::new(token, "", None)),
        (_, Ok(code)) => {
            client.acquire_token(&code)?;
            client
        }
        _ => {
            let url = client.authorization_url(Some(&generate_state()))?;
            println!("Authorize this application first:\n  {url}");
            return Ok(());
        }
    };

    match client.projects() {
        Ok(response) => {
            let projects = response.body().as_array().cloned().unwrap_or_default();
            println!("{} project(s)", projects.len());
            for project in projects {
                println!("  {} {}", project["id"], project["name"]);
            }
        }
        Err(ApiError::RateLimited { retry_after }) => println!("Rate limited, retry in {retry_after}s"),
        Err(ApiError::TokenExpired) => println!("Token expired, refresh and retry"),
        Err(other) => return Err(other.into()),
    }

    Ok(())
}
