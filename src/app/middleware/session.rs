use {
    axum_login::tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer},
    time::Duration,
};

use tracing::debug;

use crate::util::{SameSiteConfig, SessionConfig};

pub fn create_session_layer(config: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    debug!("Creating session layer");

    let same_site = match config.same_site_policy {
        SameSiteConfig::Strict => SameSite::Strict,
        SameSiteConfig::Lax => SameSite::Lax,
        SameSiteConfig::None => SameSite::None,
    };

    let session_store = MemoryStore::default();
    SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
}
