//! Account form validation.

use thiserror::Error;

/// Email domains accepted for account creation.
pub const ALLOWED_EMAIL_DOMAINS: [&str; 2] = ["@gmail.com", "@googlemail.com"];

/// Why an account form was rejected. The display text is shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    /// Name is blank after trimming
    #[error("Add your name to continue.")]
    MissingName,

    /// Email is not shaped like `local@domain.tld`
    #[error("Enter a valid email address.")]
    InvalidEmail,

    /// Email is not on an allowed domain
    #[error("Use a Google (Gmail) email address to create an account.")]
    UnsupportedDomain,
}

/// A validated account form: trimmed name, trimmed lower-cased email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountForm {
    /// Display name
    pub name: String,

    /// Lower-cased email address
    pub email: String,
}

/// Validate the account form, checking name, email shape and domain in that order.
pub fn validate_account(name: &str, email: &str) -> Result<AccountForm, AccountError> {
    let name = name.trim();
    let email = email.trim().to_lowercase();

    if name.is_empty() {
        return Err(AccountError::MissingName);
    }
    if !is_valid_email(&email) {
        return Err(AccountError::InvalidEmail);
    }
    if !ALLOWED_EMAIL_DOMAINS
        .iter()
        .any(|domain| email.ends_with(domain))
    {
        return Err(AccountError::UnsupportedDomain);
    }

    Ok(AccountForm {
        name: name.to_string(),
        email,
    })
}

/// Minimal `local@domain.tld` shape: no whitespace, a single `@`, and a dot
/// inside the domain with text on both sides.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let chars: Vec<char> = domain.chars().collect();
    chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
}
