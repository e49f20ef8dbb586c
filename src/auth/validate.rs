//! Pure input validation for the signup and login forms.
//!
//! Only field constraints live here; business rules (uniqueness, credential
//! match) are checked by the flow layer against the store and hasher.

use thiserror::Error;

pub const USERNAME_MIN_CHARS: usize = 4;
pub const USERNAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username must be between {USERNAME_MIN_CHARS} and {USERNAME_MAX_CHARS} characters")]
    Username,

    #[error("password must be between {PASSWORD_MIN_CHARS} and {PASSWORD_MAX_CHARS} characters")]
    Password,
}

/// Length check on the raw username, counted in characters.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let chars = username.chars().count();
    if (USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&chars) {
        Ok(())
    } else {
        Err(ValidationError::Username)
    }
}

/// Length check on the plaintext password, counted in characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let chars = password.chars().count();
    if (PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&chars) {
        Ok(())
    } else {
        Err(ValidationError::Password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_length_bounds() {
        assert_eq!(validate_username(""), Err(ValidationError::Username));
        assert_eq!(validate_username("abc"), Err(ValidationError::Username));
        assert_eq!(validate_username("abcd"), Ok(()));
        assert_eq!(validate_username(&"a".repeat(20)), Ok(()));
        assert_eq!(
            validate_username(&"a".repeat(21)),
            Err(ValidationError::Username)
        );
    }

    #[test]
    fn password_length_bounds() {
        assert_eq!(validate_password("short"), Err(ValidationError::Password));
        assert_eq!(validate_password("12345678"), Ok(()));
        assert_eq!(validate_password(&"p".repeat(20)), Ok(()));
        assert_eq!(
            validate_password(&"p".repeat(21)),
            Err(ValidationError::Password)
        );
    }

    #[test]
    fn lengths_are_counted_in_characters_not_bytes() {
        // Four characters, more than four bytes.
        assert_eq!(validate_username("ñañá"), Ok(()));
        assert_eq!(validate_password("contraseña"), Ok(()));
    }
}
