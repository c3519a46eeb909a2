//! Login form with client-side credential checks

use crate::auth::SessionStore;
use crate::core::error::{ClientError, Result};
use crate::views::View;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref USERNAME_PATTERN: Regex = Regex::new(r"^[a-zA-Z0-9]+$").unwrap();
}

pub const MISSING_CREDENTIALS: &str = "Please enter your username and password.";
pub const INVALID_USERNAME: &str = "Username may only contain letters and digits.";
pub const LOGIN_REJECTED: &str = "Login failed. Check your username and password.";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    error: Option<String>,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ClientError::ValidationError(MISSING_CREDENTIALS.to_string()));
        }
        if !USERNAME_PATTERN.is_match(&self.username) {
            return Err(ClientError::ValidationError(INVALID_USERNAME.to_string()));
        }
        Ok(())
    }

    /// Validate and log in. The password is cleared afterwards either way.
    pub async fn submit(&mut self, session: &SessionStore) -> bool {
        if let Err(e) = self.validate() {
            self.error = Some(match e {
                ClientError::ValidationError(message) => message,
                other => other.to_string(),
            });
            return false;
        }

        let ok = session.login(&self.username, &self.password).await;
        self.password.clear();
        self.error = if ok { None } else { Some(LOGIN_REJECTED.to_string()) };
        ok
    }
}

impl View for LoginForm {
    fn render(&self) -> Vec<String> {
        let mut lines = vec![
            "MTSSBJ login".to_string(),
            format!("Username: {}", self.username),
            format!("Password: {}", "*".repeat(self.password.chars().count())),
        ];
        if let Some(error) = &self.error {
            lines.push(format!("! {}", error));
        }
        lines
    }
}
