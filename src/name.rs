//! Validation shared by the user-facing names of wallets and categories.

use crate::Error;

/// The maximum number of characters in a wallet or category name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Trims `raw` and checks that it is non-empty and at most `max_chars`
/// characters long.
///
/// `what` names the field in the error message, e.g. "Wallet name".
pub fn validate_name(raw: &str, max_chars: usize, what: &str) -> Result<String, Error> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{what} cannot be empty.")));
    }

    if trimmed.chars().count() > max_chars {
        return Err(Error::InvalidInput(format!(
            "{what} must be at most {max_chars} characters."
        )));
    }

    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::validate_name;

    #[test]
    fn trims_whitespace() {
        assert_eq!(validate_name("  Cash ", 100, "Name"), Ok("Cash".to_owned()));
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(
            validate_name(" \t ", 100, "Wallet name"),
            Err(Error::InvalidInput("Wallet name cannot be empty.".to_owned()))
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        let name = "ก".repeat(100);

        assert_eq!(validate_name(&name, 100, "Name"), Ok(name.clone()));
        assert!(validate_name(&format!("{name}ก"), 100, "Name").is_err());
    }
}
