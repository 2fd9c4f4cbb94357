use auction_sqlite::types::UserId;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

// Tokens in these tests are not signed: the identity is written in plain text
// into the `Authorization: Bearer <...>` header, which makes it trivial to
// act as any user (or admin) from a test.
#[derive(Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub admin: bool,
}

impl Permissions {
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            admin: false,
        }
    }

    pub fn admin(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            admin: true,
        }
    }
}

impl Display for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = serde_html_form::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl FromStr for Permissions {
    type Err = serde_html_form::de::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let deserializer = serde_html_form::Deserializer::new(form_urlencoded::parse(s.as_bytes()));
        Self::deserialize(deserializer)
    }
}
