use std::collections::HashMap;

use {
    axum_login::AuthManagerLayerBuilder,
    oauth2::{basic::BasicClient, AuthUrl, RedirectUrl, TokenUrl},
    sqlx::SqlitePool,
};

use axum::Router;
use tracing::{debug, info};

use crate::{
    error::Error,
    oauth::backend::Backend,
    web::router::{auth, home, login, logout},
    Config,
};

use super::middleware::{file::create_file_service, session::create_session_layer};

/// Assembles the session layer, the OAuth backend and the page routes into
/// a servable application.
pub struct Builder {
    config: Config,
}

impl Builder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the application.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider URL in the config is invalid, the
    /// in-memory database cannot be initialized, or the web root is missing.
    pub async fn build(self) -> Result<App, Error> {
        let mut oauth_providers = HashMap::new();

        for (client_name, client_config) in &self.config.oauth_providers {
            debug!("Configuring oauth client: {}", client_name);
            let client_id = client_config.client_id.clone();
            let client_secret = client_config.client_secret.clone();

            let auth_url = AuthUrl::new(client_config.auth_uri.clone())?;
            let token_url = TokenUrl::new(client_config.token_uri.clone())?;

            let normalised_url = self
                .config
                .website
                .format_public_server_url(&format!("/oauth/{client_name}/callback"));

            let redirect_url = RedirectUrl::new(normalised_url)?;

            let client =
                BasicClient::new(client_id, Some(client_secret), auth_url, Some(token_url))
                    .set_redirect_uri(redirect_url);

            oauth_providers.insert(client_name.clone(), client);
            debug!("OAuth client configured: {}", client_name);
        }

        let db = SqlitePool::connect(":memory:").await?;

        debug!("Running database migrations");
        sqlx::migrate!().run(&db).await?;

        let session_layer = create_session_layer(&self.config.session);
        let backend = Backend::new(db, oauth_providers);
        let auth_layer = AuthManagerLayerBuilder::new(backend, session_layer).build();

        let routes = self.config.routes.with_root();
        let router = home::router(&routes.public_home)
            .merge(login::router())
            .merge(logout::router(&routes.public_logout))
            .merge(auth::router())
            .layer(auth_layer);

        let file_service = create_file_service(&self.config)?;

        info!("App successfully initialized");

        Ok(App {
            router: router
                .with_state(self.config.clone())
                .fallback_service(file_service),
            config: self.config,
        })
    }
}

pub struct App {
    pub router: Router,
    pub config: Config,
}

impl App {
    /// Bind and serve until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if the listen address cannot be bound.
    pub async fn serve(self) -> Result<(), Error> {
        let listener = tokio::net::TcpListener::bind(&self.config.website.bind_address).await?;
        info!(addr = %listener.local_addr()?, "Listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
