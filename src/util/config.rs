#![allow(clippy::module_name_repetitions)]

use std::{collections::HashMap, path::Path};

use {
    derivative::Derivative,
    oauth2::{ClientId, ClientSecret},
    serde::{Deserialize, Serialize},
    strum::{Display, EnumString, VariantNames},
};

use crate::Error;

/// One configured OAuth provider, keyed by its id (e.g. `google`).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthProviderConfig {
    pub display_name: String,
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
}

#[derive(Default, Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub same_site_policy: SameSiteConfig,
}

#[derive(
    Default, Display, EnumString, VariantNames, Debug, Serialize, Deserialize, Clone, PartialEq, Eq,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SameSiteConfig {
    Strict,
    #[default]
    Lax,
    None,
}

#[derive(Debug, Serialize, Deserialize, Derivative, Clone)]
#[derivative(Default)]
#[serde(default)]
pub struct WebsiteConfig {
    #[derivative(Default(value = "\"127.0.0.1:8080\".into()"))]
    pub bind_address: String,
    #[derivative(Default(value = "\"http://localhost:8080\".into()"))]
    pub public_url: String,
}

impl WebsiteConfig {
    /// Joins a path onto the externally visible server URL.
    #[must_use]
    pub fn format_public_server_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.public_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Derivative, Clone)]
#[derivative(Default)]
#[serde(default)]
pub struct Routes {
    #[derivative(Default(value = "\"/\".into()"))]
    pub root: String,
    #[derivative(Default(value = "String::new()"))]
    pub public_home: String,
    #[derivative(Default(value = "\"login\".into()"))]
    pub public_login: String,
    #[derivative(Default(value = "\"logout\".into()"))]
    pub public_logout: String,
}

impl Routes {
    /// Returns a new `Routes` struct with the `root` path prepended to all paths.
    #[must_use]
    pub fn with_root(&self) -> Self {
        let normalized_base = normalize_slash(&self.root);
        Self {
            root: normalized_base.clone(),
            public_home: join_paths(&normalized_base, &self.public_home),
            public_login: join_paths(&normalized_base, &self.public_login),
            public_logout: join_paths(&normalized_base, &self.public_logout),
        }
    }
}

fn normalize_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

fn join_paths(base: &str, path: &str) -> String {
    let trimmed_base = base.trim_end_matches('/');
    let trimmed_path = path.trim_start_matches('/');
    format!("{trimmed_base}/{trimmed_path}")
}

#[derive(Debug, Serialize, Deserialize, Derivative, Clone)]
#[derivative(Default)]
#[serde(default)]
pub struct Config {
    pub website: WebsiteConfig,
    pub session: SessionConfig,
    pub oauth_providers: HashMap<String, AuthProviderConfig>,
    pub routes: Routes,
    #[derivative(Default(value = "\"public\".into()"))]
    pub web_root: String,
    #[derivative(Default(value = "\"index.html\".into()"))]
    pub index_page: String,
}

/// Loads `default.toml` from the directory and overlays `local.toml` on top
/// of it when present. Unset keys fall back to the serde defaults.
pub fn load_config_from_dir(dir: impl AsRef<Path>) -> Result<Config, Error> {
    let dir = dir.as_ref();

    let default_path = dir.join("default.toml");
    let mut merged: toml::Value = std::fs::read_to_string(&default_path)?.parse()?;

    let local_path = dir.join("local.toml");
    if local_path.exists() {
        let local: toml::Value = std::fs::read_to_string(&local_path)?.parse()?;
        merge_values(&mut merged, local);
    }

    Ok(merged.try_into()?)
}

fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
