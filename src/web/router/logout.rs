use axum::{routing::get, Router};

use crate::Config;

pub fn router(logout_page: &str) -> Router<Config> {
    Router::new().route(logout_page, get(self::get::logout))
}

mod get {

    use axum::{
        http::StatusCode,
        response::{IntoResponse, Redirect},
    };

    use crate::AuthSession;

    pub async fn logout(mut auth_session: AuthSession) -> impl IntoResponse {
        match auth_session.logout().await {
            Ok(_) => Redirect::to("/").into_response(),
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
