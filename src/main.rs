use authview::{load_config_from_dir, Builder, Error};

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config".to_string());
    let config = load_config_from_dir(&config_dir)?;

    Builder::new(config).build().await?.serve().await
}
