use std::collections::HashMap;

use {
    axum::async_trait,
    axum_login::{AuthnBackend, UserId},
    oauth2::{
        basic::BasicClient, reqwest::async_http_client, url::Url, AuthorizationCode, CsrfToken,
        Scope, TokenResponse,
    },
    reqwest::header::{HeaderName as ReqwestHeaderName, HeaderValue},
    serde::Deserialize,
    sqlx::SqlitePool,
};

use crate::{model::User, Error};

use super::Credentials;

/// Userinfo fields across the supported providers. Google reports `email`,
/// `name` and `picture`; GitHub reports `login`, `name` and `avatar_url`.
#[derive(Debug, Deserialize)]
struct UserInfo {
    login: Option<String>,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    avatar_url: Option<String>,
}

impl UserInfo {
    fn identity(&self, provider: &str) -> Result<String, Error> {
        match provider {
            "google" => self.email.clone().ok_or_else(|| {
                Error::OAuth2Generic("Email not found in response from Google.".to_string())
            }),
            "github" => self.login.clone().ok_or_else(|| {
                Error::OAuth2Generic("Login not found in response from GitHub.".to_string())
            }),
            other => Err(Error::OAuth2Generic(format!(
                "Unsupported provider `{other}`."
            ))),
        }
    }

    fn avatar(&self, provider: &str) -> Option<String> {
        match provider {
            "github" => self.avatar_url.clone(),
            _ => self.picture.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Backend {
    db: SqlitePool,
    oauth_providers: HashMap<String, BasicClient>,
}

impl Backend {
    pub const fn new(db: SqlitePool, oauth_providers: HashMap<String, BasicClient>) -> Self {
        Self {
            db,
            oauth_providers,
        }
    }

    /// Begin-sign-in half of the provider seam: a fresh CSRF token and the
    /// URL the user agent must visit to consent.
    pub fn authorize_url(&self, provider: &str) -> Result<(Url, CsrfToken), Error> {
        self.oauth_providers.get(provider).map_or_else(
            || Err(Error::ClientConfigNotFound(provider.to_string())),
            |oauth_client| {
                let csrf_token = CsrfToken::new_random();

                let scopes: Vec<Scope> = ["openid", "profile", "email"]
                    .into_iter()
                    .map(|s| Scope::new(s.to_string()))
                    .collect();

                Ok(oauth_client
                    .clone()
                    .authorize_url(|| csrf_token.clone())
                    .add_scopes(scopes)
                    .url())
            },
        )
    }
}

#[async_trait]
impl AuthnBackend for Backend {
    type User = User;
    type Credentials = Credentials;
    type Error = Error;

    async fn authenticate(
        &self,
        creds: Self::Credentials,
    ) -> Result<Option<Self::User>, Self::Error> {
        let Some(oauth_client) = self.oauth_providers.get(&creds.provider) else {
            return Err(Error::ClientConfigNotFound(creds.provider));
        };

        let token_res = oauth_client
            .exchange_code(AuthorizationCode::new(creds.code))
            .request_async(async_http_client)
            .await
            .map_err(Self::Error::OAuth2)?;

        let user_agent_header = ReqwestHeaderName::from_static("user-agent");
        let authorization_header = ReqwestHeaderName::from_static("authorization");

        let user_agent_value = HeaderValue::from_static("authview");
        let authorization_value =
            HeaderValue::from_str(&format!("Bearer {}", token_res.access_token().secret()))
                .map_err(Error::InvalidHttpHeaderValue)?;

        let response = reqwest::Client::new()
            .get(creds.userinfo_uri)
            .header(user_agent_header, user_agent_value)
            .header(authorization_header, authorization_value)
            .send()
            .await
            .map_err(Self::Error::Reqwest)?;

        let user_info = response
            .json::<UserInfo>()
            .await
            .map_err(Self::Error::Reqwest)?;

        let login_id = user_info.identity(&creds.provider)?;
        let avatar_url = user_info.avatar(&creds.provider);

        let expires_in_seconds = token_res.expires_in().map(|d| {
            let secs = d.as_secs();
            i64::try_from(secs).unwrap_or(i64::MAX)
        });

        let user = sqlx::query_as(
            r"
            insert into users (username, name, avatar_url, access_token, refresh_token, expires_in)
            values (?, ?, ?, ?, ?, ?)
            on conflict(username) do update
            set name = excluded.name,
                avatar_url = excluded.avatar_url,
                access_token = excluded.access_token,
                refresh_token = excluded.refresh_token,
                expires_in = excluded.expires_in
            returning *
            ",
        )
        .bind(login_id)
        .bind(user_info.name)
        .bind(avatar_url)
        .bind(token_res.access_token().secret())
        .bind(token_res.refresh_token().map(oauth2::RefreshToken::secret))
        .bind(expires_in_seconds)
        .fetch_one(&self.db)
        .await
        .map_err(Self::Error::Sqlx)?;

        Ok(Some(user))
    }

    async fn get_user(&self, user_id: &UserId<Self>) -> Result<Option<Self::User>, Self::Error> {
        Ok(sqlx::query_as("select * from users where id = ?")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .map_err(Self::Error::Sqlx)?)
    }
}

#[cfg(test)]
mod tests {
    use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

    use super::*;

    async fn backend_with_google() -> Backend {
        let client = BasicClient::new(
            ClientId::new("test-client".to_string()),
            Some(ClientSecret::new("test-secret".to_string())),
            AuthUrl::new("https://accounts.google.com/o/oauth2/auth".to_string()).unwrap(),
            Some(TokenUrl::new("https://oauth2.googleapis.com/token".to_string()).unwrap()),
        )
        .set_redirect_uri(
            RedirectUrl::new("http://localhost:8080/oauth/google/callback".to_string()).unwrap(),
        );

        let db = SqlitePool::connect(":memory:").await.unwrap();
        Backend::new(db, HashMap::from([("google".to_string(), client)]))
    }

    #[tokio::test]
    async fn authorize_url_targets_configured_endpoint() {
        let backend = backend_with_google().await;
        let (url, token) = backend.authorize_url("google").unwrap();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("client_id".to_string(), "test-client".to_string())));
        assert!(query.contains(&("state".to_string(), token.secret().clone())));
        assert!(query
            .iter()
            .any(|(k, v)| k == "scope" && v.contains("openid")));
    }

    #[tokio::test]
    async fn authorize_url_rejects_unknown_provider() {
        let backend = backend_with_google().await;
        assert!(matches!(
            backend.authorize_url("facebook"),
            Err(Error::ClientConfigNotFound(p)) if p == "facebook"
        ));
    }

    #[test]
    fn identity_prefers_email_for_google() {
        let info = UserInfo {
            login: Some("ignored".into()),
            email: Some("alice@example.com".into()),
            name: None,
            picture: None,
            avatar_url: None,
        };
        assert_eq!(info.identity("google").unwrap(), "alice@example.com");
    }

    #[test]
    fn identity_requires_login_for_github() {
        let info = UserInfo {
            login: None,
            email: Some("alice@example.com".into()),
            name: None,
            picture: None,
            avatar_url: None,
        };
        assert!(info.identity("github").is_err());
    }

    #[test]
    fn avatar_field_depends_on_provider() {
        let info = UserInfo {
            login: None,
            email: None,
            name: None,
            picture: Some("/picture.png".into()),
            avatar_url: Some("/avatar.png".into()),
        };
        assert_eq!(info.avatar("google").as_deref(), Some("/picture.png"));
        assert_eq!(info.avatar("github").as_deref(), Some("/avatar.png"));
    }
}
