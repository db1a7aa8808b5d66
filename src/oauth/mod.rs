use {
    oauth2::CsrfToken,
    serde::Deserialize,
};

pub mod backend;

pub const CSRF_STATE_KEY: &str = "oauth.csrf-state";
pub const DEFAULT_PROVIDER: &str = "google";
pub const NEXT_URL_KEY: &str = "auth.next-url";

/// Query parameters the provider sends back to the callback route.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthzResp {
    pub code: String,
    pub state: CsrfToken,
}

/// Inputs for the token exchange against a configured provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub code: String,
    pub provider: String,
    pub userinfo_uri: String,
}

#[derive(Debug, Deserialize)]
pub struct NextUrl {
    #[serde(default)]
    pub next: String,
}
