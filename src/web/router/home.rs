use {askama::Template, axum::routing::get, axum::Router};

use crate::{util::Config, view::ViewState};

/// The session-derived page: one template, two layouts, picked by the
/// derived view state.
#[derive(Template)]
#[template(path = "home.html")]
pub struct Home {
    pub state: ViewState,
    pub provider: String,
    pub logout_url: String,
    pub next: String,
}

pub fn router(public_home: &str) -> Router<Config> {
    Router::new().route(public_home, get(self::get::home))
}

mod get {

    use axum::extract::State;

    use crate::{
        oauth::DEFAULT_PROVIDER,
        view::{SessionStatus, ViewState},
        AuthSession, Config,
    };

    use super::Home;

    pub async fn home(auth_session: AuthSession, State(config): State<Config>) -> Home {
        let status = auth_session.user.as_ref().map_or(
            SessionStatus::Unauthenticated,
            |user| SessionStatus::Authenticated(user.payload()),
        );

        let routes = config.routes.with_root();
        Home {
            state: ViewState::derive(&status),
            provider: DEFAULT_PROVIDER.to_string(),
            logout_url: routes.public_logout,
            next: routes.public_home,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::view::{SessionStatus, UserPayload};

    use super::*;

    fn page(status: &SessionStatus) -> String {
        Home {
            state: ViewState::derive(status),
            provider: "google".to_string(),
            logout_url: "/logout".to_string(),
            next: "/".to_string(),
        }
        .render()
        .expect("template should render")
    }

    #[test]
    fn authenticated_layout_shows_greeting_avatar_and_logout() {
        let html = page(&SessionStatus::Authenticated(UserPayload {
            name: Some("Alice".into()),
            image: Some("/a.png".into()),
        }));

        assert!(html.contains("Welcome, Alice!"));
        assert!(html.contains(r#"src="/a.png""#));
        assert!(html.contains(r#"href="/logout""#));
        assert!(!html.contains(r#"action="/login/google""#));
    }

    #[test]
    fn authenticated_layout_defaults_missing_profile_fields() {
        let html = page(&SessionStatus::Authenticated(UserPayload::default()));

        assert!(html.contains("Welcome, User!"));
        assert!(html.contains(r#"src="/default-profile.png""#));
    }

    #[test]
    fn unauthenticated_layout_shows_only_the_login_control() {
        let html = page(&SessionStatus::Unauthenticated);

        assert_eq!(html.matches(r#"action="/login/google""#).count(), 1);
        assert!(!html.contains("Welcome, "));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn loading_renders_the_neutral_shell() {
        let html = page(&SessionStatus::Loading);

        assert!(html.contains("Welcome to the Home Page"));
        assert!(!html.contains("action="));
        assert!(!html.contains("Welcome, "));
    }

    #[test]
    fn signing_out_restores_the_login_control() {
        let authed = page(&SessionStatus::Authenticated(UserPayload {
            name: Some("Alice".into()),
            image: Some("/a.png".into()),
        }));
        assert!(!authed.contains(r#"action="/login/google""#));

        for _ in 0..2 {
            let signed_out = page(&SessionStatus::Unauthenticated);
            assert!(signed_out.contains(r#"action="/login/google""#));
            assert!(!signed_out.contains("Welcome, Alice!"));
        }
    }
}
