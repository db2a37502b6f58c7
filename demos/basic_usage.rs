//! configuse 客户端基本用法
//!
//! ```bash
//! CONFIGUSE_PROJECT_KEY=my-project RUST_LOG=debug cargo run --example basic_usage
//! ```

use anyhow::Result;
use configuse::{get_environment_variable, ConfigClient, Settings};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let project_key = get_environment_variable("CONFIGUSE_PROJECT_KEY");
    if project_key.is_empty() {
        anyhow::bail!("CONFIGUSE_PROJECT_KEY is not set");
    }
    let settings = Settings::new(project_key.as_str())
        .with_refresh_interval(Duration::from_secs(10))
        .with_first_load_retry_count(3);

    let client = ConfigClient::init(settings)?;
    client.wait_initialized().await?;

    let reader = client.reader();
    for _ in 0..6 {
        for (key, value) in reader.snapshot() {
            println!("{} = {}", key, value);
        }
        tokio::time::sleep(Duration::from_secs(10)).await;
    }

    Ok(())
}
