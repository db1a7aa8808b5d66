use axum::{routing::get, Router};

use crate::Config;

pub fn router() -> Router<Config> {
    Router::new().route("/oauth/:provider/callback", get(self::get::callback))
}

/// Only app-relative paths are honored as post-login destinations; anything
/// else is an open-redirect vector.
fn safe_next(next: &str) -> bool {
    next.starts_with('/') && !next.starts_with("//")
}

mod get {

    use {
        axum::{
            extract::{Path, Query, State},
            response::{IntoResponse, Redirect},
        },
        axum_login::tower_sessions::Session,
    };

    use tracing::{debug, error, warn};

    use crate::{
        oauth::{AuthzResp, Credentials, CSRF_STATE_KEY, NEXT_URL_KEY},
        AuthSession, Config, Error,
    };

    use super::safe_next;

    pub async fn callback(
        mut auth_session: AuthSession,
        session: Session,
        State(config): State<Config>,
        Path(provider): Path<String>,
        Query(AuthzResp {
            code,
            state: new_state,
        }): Query<AuthzResp>,
    ) -> Result<impl IntoResponse, Error> {
        debug!("OAuth callback for provider: {}", provider);

        let old_state: String = session
            .get(CSRF_STATE_KEY)
            .await
            .map_err(|_| Error::SessionStateError("Failed to retrieve CSRF state".to_string()))?
            .ok_or(Error::MissingCSRFState)?;

        if old_state != *new_state.secret() {
            return Err(Error::InvalidCSRFState);
        }

        let oauth_client = config
            .oauth_providers
            .get(&provider)
            .ok_or_else(|| Error::ProviderNotFoundError(provider.clone()))?;

        let creds = Credentials {
            code,
            provider,
            userinfo_uri: oauth_client.userinfo_uri.clone(),
        };

        let user = match auth_session.authenticate(creds).await {
            Ok(Some(user)) => {
                debug!("User authenticated successfully");
                user
            }
            Ok(None) => {
                warn!("Authentication succeeded but no user was found");
                return Err(Error::AuthenticationError("User not found".to_string()));
            }
            Err(e) => {
                error!("Internal error during authentication: {:?}", e);
                return Err(Error::AuthenticationError(e.to_string()));
            }
        };

        auth_session.login(&user).await.map_err(|e| {
            error!("Error logging in the user: {:?}", e);
            Error::LoginError("Error logging in the user".to_string())
        })?;

        let home = config.routes.with_root().public_home;
        match session.remove::<String>(NEXT_URL_KEY).await {
            Ok(Some(next)) if !next.is_empty() => {
                if safe_next(&next) {
                    Ok(Redirect::to(&next).into_response())
                } else {
                    error!("Refusing non-local next URL: {}", next);
                    Err(Error::InvalidNextUrl(next))
                }
            }
            _ => Ok(Redirect::to(&home).into_response()),
        }
    }
}
