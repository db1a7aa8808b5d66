use {askama::Template, askama_axum::IntoResponse};

use axum::{
    extract::Path,
    routing::{get, post},
    Router,
};

use tracing::error;

use crate::{oauth::NextUrl, Config};

#[derive(Template)]
#[template(path = "login.html")]
pub struct Login {
    pub message: Option<String>,
    pub next: String,
    pub provider_id: String,
    pub provider_name: String,
}

pub fn router() -> Router<Config> {
    Router::new()
        .route("/login/:provider", post(self::post::login))
        .route("/login/:provider", get(self::get::login))
}

mod post {

    use axum_login::tower_sessions::Session;

    use axum::{extract::State, response::Redirect, Form};

    use crate::{
        oauth::{CSRF_STATE_KEY, NEXT_URL_KEY},
        AuthSession, Error,
    };

    use super::{error, Config, IntoResponse, NextUrl, Path};

    pub async fn login(
        auth_session: AuthSession,
        session: Session,
        Path(provider): Path<String>,
        State(_config): State<Config>,
        Form(NextUrl { next }): Form<NextUrl>,
    ) -> Result<impl IntoResponse, Error> {
        let (url, token) = auth_session.backend.authorize_url(&provider).map_err(|e| {
            error!("Error generating authorization URL: {:?}", e);
            Error::AuthorizationUrlError(e.to_string())
        })?;

        session
            .insert(CSRF_STATE_KEY, token.secret())
            .await
            .map_err(|e| {
                error!("Error serializing CSRF token: {:?}", e);
                Error::SerializationError(e.to_string())
            })?;

        session.insert(NEXT_URL_KEY, next).await.map_err(|e| {
            error!("Error serializing next URL: {:?}", e);
            Error::SerializationError(e.to_string())
        })?;

        Ok(Redirect::to(url.as_str()).into_response())
    }
}

mod get {

    use axum::extract::{Query, State};

    use crate::Error;

    use super::{Config, IntoResponse, Login, NextUrl, Path};

    pub async fn login(
        Query(NextUrl { next }): Query<NextUrl>,
        Path(provider): Path<String>,
        State(config): State<Config>,
    ) -> Result<Login, impl IntoResponse> {
        config.oauth_providers.get(&provider).map_or_else(
            || Err(Error::ProviderNotFoundError(provider.clone())),
            |client| {
                Ok(Login {
                    message: None,
                    next,
                    provider_id: provider.clone(),
                    provider_name: client.display_name.clone(),
                })
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_targets_the_requested_provider() {
        let html = Login {
            message: None,
            next: "/".to_string(),
            provider_id: "google".to_string(),
            provider_name: "Google".to_string(),
        }
        .render()
        .expect("template should render");

        assert!(html.contains(r#"action="/login/google""#));
        assert!(html.contains("Sign in with Google"));
        assert!(!html.contains("class=\"message\""));
    }

    #[test]
    fn login_page_shows_a_message_when_present() {
        let html = Login {
            message: Some("Please sign in first.".to_string()),
            next: "/".to_string(),
            provider_id: "google".to_string(),
            provider_name: "Google".to_string(),
        }
        .render()
        .expect("template should render");

        assert!(html.contains("Please sign in first."));
    }
}
