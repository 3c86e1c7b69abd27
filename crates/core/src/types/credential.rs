//! Login credential submitted to the adoption service.

use serde::Serialize;

use super::email::{Email, EmailError};

/// Errors raised while building a [`Credential`] from form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The name field is empty or blank.
    #[error("name cannot be empty")]
    EmptyName,
    /// The email field is missing or malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Name and email pair used to open a session.
///
/// The credential is only held long enough to be submitted; the session
/// itself lives in the service's cookie. Serializes to the login request
/// body `{"name": ..., "email": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    name: String,
    email: Email,
}

impl Credential {
    /// Validate raw form input into a credential.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::EmptyName`] if the name is blank, or
    /// [`CredentialError::InvalidEmail`] if the email does not parse.
    pub fn new(name: &str, email: &str) -> Result<Self, CredentialError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CredentialError::EmptyName);
        }

        Ok(Self {
            name: name.to_owned(),
            email: Email::parse(email)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }
}
