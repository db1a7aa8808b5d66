use {
    axum_login::AuthUser,
    serde::{Deserialize, Serialize},
    sqlx::FromRow,
};

use crate::view::UserPayload;

use super::Identifiable;

/// A signed-in user as the session layer re-resolves it between requests.
/// Rows live in the in-memory database for the lifetime of the process only.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

impl User {
    /// Profile fields the view derives its state from.
    #[must_use]
    pub fn payload(&self) -> UserPayload {
        UserPayload {
            name: self.name.clone(),
            image: self.avatar_url.clone(),
        }
    }
}

impl AuthUser for User {
    type Id = i64;

    fn session_auth_hash(&self) -> &[u8] {
        self.access_token.as_bytes()
    }

    fn id(&self) -> Self::Id {
        Identifiable::id(self)
    }
}

impl Identifiable<i64> for User {
    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_profile_fields() {
        let user = User {
            username: "alice@example.com".into(),
            name: Some("Alice".into()),
            avatar_url: Some("/a.png".into()),
            ..User::default()
        };
        let payload = user.payload();
        assert_eq!(payload.name.as_deref(), Some("Alice"));
        assert_eq!(payload.image.as_deref(), Some("/a.png"));
    }

    #[test]
    fn payload_preserves_absence() {
        let payload = User::default().payload();
        assert!(payload.name.is_none());
        assert!(payload.image.is_none());
    }
}
