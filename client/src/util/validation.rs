//! Client-side form validation for the auth modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rules here gate submission only. The backend stays the authority and may
//! still reject a request that passes every check below.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::fmt;

use regex::Regex;

use crate::net::types::{LoginRequest, RegisterRequest, ResetPasswordRequest};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_USERNAME_LEN: usize = 3;

pub const INVALID_EMAIL: &str = "Invalid email address";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const PASSWORD_TOO_WEAK: &str =
    "Password must contain at least one uppercase letter, one lowercase letter, and one number";
pub const USERNAME_TOO_SHORT: &str = "Username must be at least 3 characters";
pub const PASSWORDS_MISMATCH: &str = "Passwords don't match";

/// Per-field validation messages. `None` means the field passed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.username.is_none() && self.password.is_none() && self.confirm_password.is_none()
    }

    fn messages(&self) -> impl Iterator<Item = &str> {
        [&self.email, &self.username, &self.password, &self.confirm_password]
            .into_iter()
            .filter_map(|m| m.as_deref())
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.messages().collect::<Vec<_>>().join("; ");
        f.write_str(&joined)
    }
}

/// Raw login form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Raw signup form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Raw forgot-password form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetForm {
    pub email: String,
}

impl LoginForm {
    /// Validate and convert into the wire request.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any rule fails.
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let email = self.email.trim();
        let errors = FieldErrors {
            email: check_email(email),
            password: check_password_len(&self.password),
            ..FieldErrors::default()
        };
        errors.into_result(LoginRequest { email: email.to_owned(), password: self.password.clone() })
    }
}

impl SignupForm {
    /// Validate and convert into the wire request. The confirmation field is
    /// checked here and never sent.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any rule fails.
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let email = self.email.trim();
        let username = self.username.trim();
        let errors = FieldErrors {
            email: check_email(email),
            username: (username.chars().count() < MIN_USERNAME_LEN).then(|| USERNAME_TOO_SHORT.to_owned()),
            password: check_password_len(&self.password).or_else(|| check_password_strength(&self.password)),
            confirm_password: (self.password != self.confirm_password).then(|| PASSWORDS_MISMATCH.to_owned()),
        };
        errors.into_result(RegisterRequest {
            username: username.to_owned(),
            email: email.to_owned(),
            password: self.password.clone(),
        })
    }
}

impl ResetForm {
    /// # Errors
    ///
    /// Returns the email message when the address is malformed.
    pub fn validate(&self) -> Result<ResetPasswordRequest, FieldErrors> {
        let email = self.email.trim();
        let errors = FieldErrors { email: check_email(email), ..FieldErrors::default() };
        errors.into_result(ResetPasswordRequest { email: email.to_owned() })
    }
}

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

fn check_email(email: &str) -> Option<String> {
    (!is_valid_email(email)).then(|| INVALID_EMAIL.to_owned())
}

fn check_password_len(password: &str) -> Option<String> {
    (password.chars().count() < MIN_PASSWORD_LEN).then(|| PASSWORD_TOO_SHORT.to_owned())
}

fn check_password_strength(password: &str) -> Option<String> {
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    (!(lower && upper && digit)).then(|| PASSWORD_TOO_WEAK.to_owned())
}
