//! Lobby form validation.
//!
//! The engine assumes well-formed names and codes; renderers run their
//! form values through these helpers first.

use crate::InputError;

/// Trim a display name, rejecting blank input.
pub fn player_name(raw: &str) -> Result<String, InputError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    Ok(name.to_string())
}

/// Trim and upper-case a join code, rejecting blank input.
pub fn join_code(raw: &str) -> Result<String, InputError> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(InputError::EmptyCode);
    }
    Ok(code.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_name_trimmed() {
        assert_eq!(player_name("  Ada ").unwrap(), "Ada");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(player_name("   "), Err(InputError::EmptyName));
        assert_eq!(player_name(""), Err(InputError::EmptyName));
    }

    #[test]
    fn test_join_code_normalized() {
        assert_eq!(join_code(" abcxyz\n").unwrap(), "ABCXYZ");
    }

    #[test]
    fn test_blank_code_rejected() {
        assert_eq!(join_code("\t"), Err(InputError::EmptyCode));
    }
}
