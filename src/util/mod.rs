mod config;

pub use config::{
    load_config_from_dir, AuthProviderConfig, Config, Routes, SameSiteConfig, SessionConfig,
    WebsiteConfig,
};
