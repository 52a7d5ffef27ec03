//! Login Demo
//!
//! Logs in and lists the customer's permissions. Runs offline against the
//! default fixtures unless `COURIER_BASE_URL` points at a live API.
//!
//! ```text
//! RUST_LOG=debug cargo run -p login-demo
//! COURIER_BASE_URL=https://api.example.com/v1 COURIER_API_KEY=secret cargo run -p login-demo
//! ```

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use std::sync::Arc;

use courier::plugins::{ActivityIndicator, ActivityPlugin, LoggingPlugin};
use courier::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const OFFLINE_BASE_URL: &str = "https://offline.invalid/";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn config(base_url: &str, api_key: Option<String>) -> courier::Result<ApiConfig> {
    let builder = ApiConfig::builder().base_url(base_url);
    match api_key {
        Some(api_key) => builder.api_key(api_key).build(),
        None => builder.build(),
    }
}

/// Build the context: live when a base URL is given, fixtures otherwise.
fn api(
    base_url: Option<String>,
    api_key: Option<String>,
    indicator: &ActivityIndicator,
) -> courier::Result<ApiContext> {
    let activity = ActivityPlugin::new(indicator.clone());

    match base_url {
        Some(base_url) => {
            info!(%base_url, "using the live API");
            let transport = HyperTransport::builder()
                .plugin(activity)
                .plugin(LoggingPlugin::new())
                .build();
            Ok(ApiContext::new(config(&base_url, api_key)?, transport))
        }
        None => {
            info!("no COURIER_BASE_URL, answering from fixtures");
            let transport = FixtureTransport::builder(Fixtures::with_defaults()?)
                .plugin(activity)
                .plugin(LoggingPlugin::new())
                .build();
            Ok(ApiContext::new(config(OFFLINE_BASE_URL, api_key)?, transport))
        }
    }
}

async fn run(api: &ApiContext) -> courier::Result<Vec<String>> {
    let session = api.login("+4512345678", "1234").await?;
    debug!(customer_id = %session.customer_id, "logged in");

    let permissions = api
        .permissions(&session.customer_id, &session.token)
        .await?;
    Ok(permissions.permissions)
}

#[tokio::main]
async fn main() -> courier::Result<()> {
    init_tracing();

    let indicator = ActivityIndicator::with_listener(|active| debug!(active, "network activity"));
    let api = api(
        std::env::var("COURIER_BASE_URL").ok(),
        std::env::var("COURIER_API_KEY").ok(),
        &indicator,
    )?;

    let permissions = run(&api).await?;
    println!("Permissions: {}", permissions.join(", "));

    // The same context keeps working once switched to fixtures.
    api.use_transport(Arc::new(FixtureTransport::new(Fixtures::with_defaults()?)));
    let session = api.login("+4512345678", "1234").await?;
    println!("Offline session for customer {}", session.customer_id);

    info!(requests = indicator.finished(), "done");
    Ok(())
}
