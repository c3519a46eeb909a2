//! Session data and its persisted form

use crate::core::error::Result;
use crate::core::storage::LocalStorage;
use serde::Serialize;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USERNAME_KEY: &str = "username";
pub const ROLE_KEY: &str = "role";

/// Lifecycle of the session store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Anonymous,
    Authenticated,
    Refreshing,
}

/// Tokens and identity of the signed-in user.
///
/// A session is authenticated exactly when it holds an access token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Rehydrate from storage; each missing key leaves its field absent
    pub fn load(storage: &dyn LocalStorage) -> Result<Self> {
        Ok(Self {
            access_token: storage.get_item(ACCESS_TOKEN_KEY)?,
            refresh_token: storage.get_item(REFRESH_TOKEN_KEY)?,
            username: storage.get_item(USERNAME_KEY)?,
            role: storage.get_item(ROLE_KEY)?,
        })
    }

    /// Write all four fields, removing the keys of absent ones
    pub fn persist(&self, storage: &dyn LocalStorage) -> Result<()> {
        for (key, value) in self.fields() {
            match value {
                Some(value) => storage.set_item(key, value)?,
                None => storage.remove_item(key)?,
            }
        }
        Ok(())
    }

    /// Remove all four keys from storage
    pub fn clear(storage: &dyn LocalStorage) -> Result<()> {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USERNAME_KEY, ROLE_KEY] {
            storage.remove_item(key)?;
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, Option<&str>); 4] {
        [
            (ACCESS_TOKEN_KEY, self.access_token.as_deref()),
            (REFRESH_TOKEN_KEY, self.refresh_token.as_deref()),
            (USERNAME_KEY, self.username.as_deref()),
            (ROLE_KEY, self.role.as_deref()),
        ]
    }
}
