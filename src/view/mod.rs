//! View state derived from the authentication session.
//!
//! The session itself is owned by the auth plumbing; this module only maps
//! its status onto what the page needs to render. Derivation is a pure
//! function so the rendering decision can be tested without any session
//! machinery.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DISPLAY_NAME: &str = "User";
pub const DEFAULT_AVATAR_URL: &str = "/default-profile.png";

/// Profile fields carried by an authenticated session. Either field may be
/// absent or empty; defaults are applied at derivation time, not here.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: Option<String>,
    pub image: Option<String>,
}

/// Three-valued session status as reported by the session layer. Transitions
/// are owned entirely by the session layer; this crate never moves between
/// states itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Authenticated(UserPayload),
    Unauthenticated,
}

/// Everything the home page needs to pick and fill a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub signed_in: bool,
    pub loading: bool,
    pub display_name: String,
    pub avatar_url: String,
}

impl ViewState {
    /// Derives the render inputs from a session status.
    ///
    /// Name and avatar are only meaningful when the status is
    /// `Authenticated`; every other status yields the fixed defaults. Empty
    /// strings in the payload count as absent.
    #[must_use]
    pub fn derive(status: &SessionStatus) -> Self {
        match status {
            SessionStatus::Authenticated(payload) => Self {
                signed_in: true,
                loading: false,
                display_name: non_empty(payload.name.as_deref())
                    .unwrap_or(DEFAULT_DISPLAY_NAME)
                    .to_string(),
                avatar_url: non_empty(payload.image.as_deref())
                    .unwrap_or(DEFAULT_AVATAR_URL)
                    .to_string(),
            },
            SessionStatus::Loading => Self {
                loading: true,
                ..Self::signed_out()
            },
            SessionStatus::Unauthenticated => Self::signed_out(),
        }
    }

    fn signed_out() -> Self {
        Self {
            signed_in: false,
            loading: false,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
