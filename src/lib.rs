#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod app;
mod error;
pub mod model;
mod oauth;
mod util;
pub mod view;
mod web;

use oauth::backend::Backend;

pub use {
    app::{App, Builder},
    error::Error,
    util::{load_config_from_dir, Config},
};

pub type AuthSession = axum_login::AuthSession<Backend>;
